//! Persisted store for [`UserState`]
//!
//! Two layouts are provided:
//! - [`KeyedStore`]: one JSON value per top-level field under the
//!   `readmore_*` keys, over any [`KeyValueBackend`]
//! - [`SnapshotStore`]: the whole state as one document, replaced atomically
//!
//! Loading never fails. Anything that cannot be decoded, or that decodes into
//! a state breaking the consistency rules, is replaced by the empty state.

mod keyed;
mod snapshot;

pub use keyed::*;
pub use snapshot::*;

use crate::state::UserState;
use thiserror::Error;

/// Storage key of the liked-works list
pub const LIKED_WORKS_KEY: &str = "readmore_likedWorks";
/// Storage key of the disliked-works list
pub const DISLIKED_WORKS_KEY: &str = "readmore_dislikedWorks";
/// Storage key of the saved-works list
pub const SAVED_WORKS_KEY: &str = "readmore_savedWorks";
/// Storage key of the saved-books list
pub const SAVED_BOOKS_KEY: &str = "readmore_savedBooks";
/// Storage key of the profile object
pub const PROFILE_KEY: &str = "readmore_profile";

/// Errors raised while writing state
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Load/save surface of the persisted state.
///
/// `load` always yields a usable state; `save` writes the whole state.
pub trait StateStore {
    fn load(&self) -> UserState;

    fn save(&mut self, state: &UserState) -> Result<(), StoreError>;
}

impl<S: StateStore + ?Sized> StateStore for Box<S> {
    fn load(&self) -> UserState {
        (**self).load()
    }

    fn save(&mut self, state: &UserState) -> Result<(), StoreError> {
        (**self).save(state)
    }
}

/// Accept a decoded state only if it is internally consistent.
pub(crate) fn recover(decoded: Result<UserState, String>, origin: &str) -> UserState {
    match decoded {
        Ok(state) => match state.check_invariants() {
            Ok(()) => state,
            Err(violation) => {
                tracing::warn!(
                    "Inconsistent state in {}: {}, starting empty",
                    origin,
                    violation
                );
                UserState::empty()
            }
        },
        Err(message) => {
            tracing::warn!("Unreadable state in {}: {}, starting empty", origin, message);
            UserState::empty()
        }
    }
}
