//! User state: rated and saved works, the shelf, and the profile
//!
//! All transitions are pure: they borrow the current [`UserState`] and return
//! a new one. Blank work ids make every transition a no-op.

mod actions;
mod shelf;
mod status;
mod user_state;

pub use actions::*;
pub use shelf::*;
pub use status::*;
pub use user_state::*;
