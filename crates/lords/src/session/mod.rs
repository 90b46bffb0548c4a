pub mod error;
pub mod file;
pub mod handle;
pub mod store;

pub use error::{SessionError, SessionResult};
pub use file::FileSessionStore;
pub use handle::{Session, SessionHandle};
pub use store::{InMemorySessionStore, SessionStore};
