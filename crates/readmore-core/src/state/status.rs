//! Per-work rating status and the toggle rules of the rating controls.
//!
//! Status is derived from set membership, never stored:
//!
//! ```text
//!   neutral --like--> liked --dislike--> disliked
//!      ^                |                   |
//!      +----unlike------+                   |
//!      +-----------------undislike----------+
//! ```
//!
//! Saved/not saved is a separate axis; all four combinations are legal.

use super::{rate_dislike, rate_like, unrate_dislike, unrate_like, UserState};
use crate::domain::{BookSummary, WorkId};
use serde::{Deserialize, Serialize};

/// Rating status of a single work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    Neutral,
    Liked,
    Disliked,
}

impl WorkStatus {
    /// Derive the status of `id` from the rated sets
    pub fn of(state: &UserState, id: &WorkId) -> Self {
        if state.is_liked(id) {
            Self::Liked
        } else if state.is_disliked(id) {
            Self::Disliked
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Liked => "liked",
            Self::Disliked => "disliked",
        }
    }
}

/// The two rating controls shown on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingControl {
    Like,
    Dislike,
}

/// Resolve a click on `control` against the current state.
///
/// An active control cancels its rating; an inactive one applies it. Exactly
/// one transition runs per click.
pub fn toggle_rating(state: &UserState, book: &BookSummary, control: RatingControl) -> UserState {
    let Some(id) = book.work_id() else {
        return state.clone();
    };

    match (control, WorkStatus::of(state, &id)) {
        (RatingControl::Like, WorkStatus::Liked) => unrate_like(state, id.as_str()),
        (RatingControl::Like, _) => rate_like(state, book),
        (RatingControl::Dislike, WorkStatus::Disliked) => unrate_dislike(state, id.as_str()),
        (RatingControl::Dislike, _) => rate_dislike(state, book),
    }
}

/// Button state for one card, derived from a freshly loaded state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardStatus {
    pub status: WorkStatus,
    pub saved: bool,
}

impl CardStatus {
    pub fn derive(state: &UserState, id: &WorkId) -> Self {
        Self {
            status: WorkStatus::of(state, id),
            saved: state.is_saved(id),
        }
    }

    pub fn like_active(&self) -> bool {
        self.status == WorkStatus::Liked
    }

    pub fn dislike_active(&self) -> bool {
        self.status == WorkStatus::Disliked
    }

    /// Saving is offered only for works not yet on the shelf
    pub fn save_enabled(&self) -> bool {
        !self.saved
    }

    pub fn like_hint(&self) -> &'static str {
        if self.like_active() {
            "You liked this book (click to cancel)"
        } else {
            "Like this book"
        }
    }

    pub fn dislike_hint(&self) -> &'static str {
        if self.dislike_active() {
            "You disliked this book (click to cancel)"
        } else {
            "Dislike this book"
        }
    }
}
