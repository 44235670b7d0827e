//! Rating and saving transitions

use super::UserState;
use crate::domain::{BookSummary, WorkId};
use crate::profile::{apply_signal, Signal};

/// Like `book`: it moves to the end of the liked set, leaves the disliked
/// set, and its subjects, authors and era gain weight.
pub fn rate_like(state: &UserState, book: &BookSummary) -> UserState {
    let Some(id) = book.work_id() else {
        return state.clone();
    };

    let mut next = state.clone();
    next.liked_works.move_to_end(&id);
    next.disliked_works.remove(&id);
    next.profile = apply_signal(&state.profile, book, Signal::Like);
    next
}

/// Dislike `book`: mirror of [`rate_like`] with negative subject and author
/// deltas. The era map is not touched.
pub fn rate_dislike(state: &UserState, book: &BookSummary) -> UserState {
    let Some(id) = book.work_id() else {
        return state.clone();
    };

    let mut next = state.clone();
    next.disliked_works.move_to_end(&id);
    next.liked_works.remove(&id);
    next.profile = apply_signal(&state.profile, book, Signal::Dislike);
    next
}

/// Put `book` on the shelf. Saving an already saved work changes nothing.
pub fn save_book(state: &UserState, book: &BookSummary) -> UserState {
    let Some(id) = book.work_id() else {
        return state.clone();
    };
    if state.is_saved(&id) {
        return state.clone();
    }

    let mut next = state.clone();
    next.saved_works.insert(&id);
    next.saved_books.retain(|b| b.work_id != id);
    next.saved_books.push(book.to_saved_book(&id));
    next.profile = apply_signal(&state.profile, book, Signal::Save);
    next
}

/// Withdraw a like. Weights gathered by the like stay in the profile.
pub fn unrate_like(state: &UserState, work_id: &str) -> UserState {
    let Some(id) = WorkId::parse(work_id) else {
        return state.clone();
    };

    let mut next = state.clone();
    next.liked_works.remove(&id);
    next
}

/// Withdraw a dislike. Weights gathered by the dislike stay in the profile.
pub fn unrate_dislike(state: &UserState, work_id: &str) -> UserState {
    let Some(id) = WorkId::parse(work_id) else {
        return state.clone();
    };

    let mut next = state.clone();
    next.disliked_works.remove(&id);
    next
}
