//! The state engine: load, transform, persist, reload, broadcast.
//!
//! Every action is resolved against the state as currently stored. After the
//! new state is saved the engine loads it back and hands that reloaded value
//! to callers and subscribers, so views are always derived from what is
//! durably stored rather than from the in-memory transform.

use crate::domain::BookSummary;
use crate::state::{
    rate_dislike, rate_like, remove_from_shelf, save_book, toggle_rating, unrate_dislike,
    unrate_like, RatingControl, UserState,
};
use crate::store::{StateStore, StoreError};
use std::sync::mpsc::{channel, Receiver, Sender};

/// A user action against the state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Like(BookSummary),
    Dislike(BookSummary),
    Save(BookSummary),
    RemoveLike(String),
    RemoveDislike(String),
    RemoveFromShelf(String),
    /// A click on a card's like or dislike control
    Toggle(BookSummary, RatingControl),
}

impl Action {
    /// Compute the state that follows `state`
    pub fn apply(&self, state: &UserState) -> UserState {
        match self {
            Action::Like(book) => rate_like(state, book),
            Action::Dislike(book) => rate_dislike(state, book),
            Action::Save(book) => save_book(state, book),
            Action::RemoveLike(id) => unrate_like(state, id),
            Action::RemoveDislike(id) => unrate_dislike(state, id),
            Action::RemoveFromShelf(id) => remove_from_shelf(state, id),
            Action::Toggle(book, control) => toggle_rating(state, book, *control),
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::Like(_) => "like",
            Action::Dislike(_) => "dislike",
            Action::Save(_) => "save",
            Action::RemoveLike(_) => "remove-like",
            Action::RemoveDislike(_) => "remove-dislike",
            Action::RemoveFromShelf(_) => "remove-from-shelf",
            Action::Toggle(_, RatingControl::Like) => "toggle-like",
            Action::Toggle(_, RatingControl::Dislike) => "toggle-dislike",
        }
    }

    /// Raw work id the action targets
    pub fn work_id(&self) -> &str {
        match self {
            Action::Like(book)
            | Action::Dislike(book)
            | Action::Save(book)
            | Action::Toggle(book, _) => &book.work_id,
            Action::RemoveLike(id) | Action::RemoveDislike(id) | Action::RemoveFromShelf(id) => id,
        }
    }
}

/// Notification sent to subscribers after each applied action
#[derive(Debug, Clone)]
pub struct StateChanged {
    pub action: &'static str,
    /// The state as reloaded from the store
    pub state: UserState,
}

/// Owns the store handle and serializes all mutations through it
pub struct Engine<S: StateStore> {
    store: S,
    subscribers: Vec<Sender<StateChanged>>,
}

impl<S: StateStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            subscribers: Vec::new(),
        }
    }

    /// Current stored state
    pub fn state(&self) -> UserState {
        self.store.load()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Receive a [`StateChanged`] after every applied action.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<StateChanged> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Apply `action`, persist the result and return the reloaded state.
    pub fn apply(&mut self, action: Action) -> Result<UserState, StoreError> {
        let current = self.store.load();
        let next = action.apply(&current);
        self.store.save(&next)?;

        let fresh = self.store.load();
        tracing::info!(
            "Applied {} for {:?} (liked {}, disliked {}, saved {})",
            action.name(),
            action.work_id().trim(),
            fresh.liked_works.len(),
            fresh.disliked_works.len(),
            fresh.saved_works.len()
        );

        let event = StateChanged {
            action: action.name(),
            state: fresh.clone(),
        };
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());

        Ok(fresh)
    }

    pub fn like(&mut self, book: BookSummary) -> Result<UserState, StoreError> {
        self.apply(Action::Like(book))
    }

    pub fn dislike(&mut self, book: BookSummary) -> Result<UserState, StoreError> {
        self.apply(Action::Dislike(book))
    }

    pub fn save(&mut self, book: BookSummary) -> Result<UserState, StoreError> {
        self.apply(Action::Save(book))
    }

    pub fn remove_from_shelf(&mut self, work_id: &str) -> Result<UserState, StoreError> {
        self.apply(Action::RemoveFromShelf(work_id.to_string()))
    }

    pub fn toggle(
        &mut self,
        book: BookSummary,
        control: RatingControl,
    ) -> Result<UserState, StoreError> {
        self.apply(Action::Toggle(book, control))
    }
}
