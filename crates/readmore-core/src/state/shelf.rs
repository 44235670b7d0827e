//! Shelf management

use super::UserState;
use crate::domain::WorkId;

/// Take a work off the shelf: drops the id and its record together.
pub fn remove_from_shelf(state: &UserState, work_id: &str) -> UserState {
    let Some(id) = WorkId::parse(work_id) else {
        return state.clone();
    };

    let mut next = state.clone();
    next.saved_works.remove(&id);
    next.saved_books.retain(|b| b.work_id != id);
    next
}
