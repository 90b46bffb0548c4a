//! Optimistic vote counters.
//!
//! A vote is modelled as a reducible transition over [`VoteCounters`] with a
//! compensating inverse, so a rejected vote is undone by replaying the
//! inverse rather than by patching fields by hand. None of this deduplicates
//! votes; the next authoritative fetch overwrites whatever is shown.

use lords_core::{AiModel, ModelId, VoteValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounters {
    pub likes: i64,
    pub dislikes: i64,
    pub vote_score: i64,
    pub total_votes: i64,
}

impl VoteCounters {
    pub fn of(model: &AiModel) -> Self {
        Self {
            likes: model.likes,
            dislikes: model.dislikes,
            vote_score: model.vote_score,
            total_votes: model.total_votes,
        }
    }

    pub fn write_to(self, model: &mut AiModel) {
        model.likes = self.likes;
        model.dislikes = self.dislikes;
        model.vote_score = self.vote_score;
        model.total_votes = self.total_votes;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteEvent {
    Cast(VoteValue),
    Retract(VoteValue),
}

impl VoteEvent {
    pub fn inverse(self) -> Self {
        match self {
            VoteEvent::Cast(value) => VoteEvent::Retract(value),
            VoteEvent::Retract(value) => VoteEvent::Cast(value),
        }
    }

    pub fn apply(self, counters: VoteCounters) -> VoteCounters {
        let (value, step) = match self {
            VoteEvent::Cast(value) => (value, 1),
            VoteEvent::Retract(value) => (value, -1),
        };

        let mut next = counters;
        match value {
            VoteValue::Up => next.likes += step,
            VoteValue::Down => next.dislikes += step,
        }
        next.vote_score += step * value.as_i64();
        next.total_votes += step;
        next
    }

    pub fn apply_to(self, model: &mut AiModel) {
        self.apply(VoteCounters::of(model)).write_to(model);
    }
}

/// New model with one vote of `value` counted
pub fn apply_vote(model: &AiModel, value: VoteValue) -> AiModel {
    let mut next = model.clone();
    VoteEvent::Cast(value).apply_to(&mut next);
    next
}

/// Apply `event` to the model with `model_id` in a list view; false if absent
pub fn apply_to_list(models: &mut [AiModel], model_id: ModelId, event: VoteEvent) -> bool {
    match models.iter_mut().find(|m| m.model_id == model_id) {
        Some(model) => {
            event.apply_to(model);
            true
        }
        None => false,
    }
}

/// A vote shown locally but not yet confirmed by the server
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending vote must be committed or rolled back"]
pub struct PendingVote {
    model_id: ModelId,
    event: VoteEvent,
    before: VoteCounters,
}

impl PendingVote {
    /// Count the vote on `model` immediately
    pub fn begin(model: &mut AiModel, value: VoteValue) -> Self {
        let before = VoteCounters::of(model);
        let event = VoteEvent::Cast(value);
        event.apply_to(model);
        Self {
            model_id: model.model_id,
            event,
            before,
        }
    }

    pub fn model_id(&self) -> ModelId {
        self.model_id
    }

    pub fn value(&self) -> VoteValue {
        match self.event {
            VoteEvent::Cast(value) | VoteEvent::Retract(value) => value,
        }
    }

    /// Counters as they were before the vote
    pub fn before(&self) -> VoteCounters {
        self.before
    }

    /// The server accepted the vote; keep the optimistic counters
    pub fn commit(self) {}

    /// The server rejected the vote; replay the inverse on `model`
    pub fn rollback(self, model: &mut AiModel) {
        self.event.inverse().apply_to(model);
    }
}
