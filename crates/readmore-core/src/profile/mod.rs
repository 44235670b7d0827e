//! Preference profile: weights and the scoring rules that move them
//!
//! Pure computation only. Every rule takes the current weights and a book
//! and produces new weights; nothing here touches storage.

mod scorer;
mod weights;

pub use scorer::*;
pub use weights::*;
