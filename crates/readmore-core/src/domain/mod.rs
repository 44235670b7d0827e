//! Domain models for ReadMore
//!
//! Books arrive from the search, recommendation and work-detail backends as
//! [`BookSummary`] values. The shelf keeps a narrower [`SavedBook`]
//! projection, and every mutation is keyed by a validated [`WorkId`].

pub mod book;
pub mod work_id;

pub use book::{AuthorRef, BookSummary, Recommendation, SavedBook};
pub use work_id::{InvalidWorkId, WorkId};
