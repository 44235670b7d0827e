//! readmore-core: client state engine for the ReadMore book discovery app
//!
//! This library provides:
//! - Per-user ratings, shelf, and taste profile, persisted across sessions
//! - The profile scorer that turns like/dislike/save into weight deltas
//! - The work status state machine (neutral, liked, disliked)
//! - Shelf management and derived views for cards, shelf, and recommendations
//! - Backend contracts for search, recommendation, and work detail
//!
//! Every user action goes through [`Engine`]: load, transform, save, reload,
//! then notify subscribers. Views are always rebuilt from the reloaded state.

pub mod client;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod merge;
pub mod profile;
pub mod state;
pub mod store;
pub mod views;

pub use client::{ApiError, RecommendOutcome, RecommendRequest};
#[cfg(feature = "native")]
pub use client::ApiClient;
pub use config::{ConfigError, ReadMoreConfig, StorageLayout};
pub use domain::{AuthorRef, BookSummary, Recommendation, SavedBook, WorkId};
pub use engine::{Action, Engine, StateChanged};
pub use error::{ReadMoreError, Result};
pub use merge::{merge_work_detail, DetailMerge, WorkDetail};
pub use profile::{apply_signal, ProfileWeights, Signal, MAX_PROFILE_ENTRIES};
pub use state::{CardStatus, RatingControl, UserState, WorkSet, WorkStatus};
pub use store::{
    DirectoryBackend, KeyValueBackend, KeyedStore, MemoryBackend, SnapshotStore, StateStore,
    StoreError,
};
pub use views::{
    DetailPanel, RecommendationPanel, RecommendationPager, SearchPanel, ShelfView, Ticket,
};
