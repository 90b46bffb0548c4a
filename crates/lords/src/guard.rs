//! Generation counter that lets a view drop responses it no longer wants.
//!
//! A view calls [`ViewGuard::begin`] before firing its requests and passes
//! the ticket back through [`ViewGuard::accept`] with the result. Anything
//! issued before the latest `begin` or before `teardown` is discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Default)]
pub struct ViewGuard {
    generation: Arc<AtomicU64>,
}

/// Proof of which generation a request was issued under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket(u64);

impl ViewGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load; earlier tickets go stale
    pub fn begin(&self) -> ViewTicket {
        ViewTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The view is gone; every outstanding ticket goes stale
    pub fn teardown(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: ViewTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    pub fn accept<T>(&self, ticket: ViewTicket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}
