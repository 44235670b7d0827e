//! Turning user actions into weighted preference signals.
//!
//! Each action contributes a fixed delta per subject and per author of the
//! book it was applied to; likes also record the book's era. After every
//! update the maps are capped so the profile stays bounded.

use super::weights::{bump, Era, ProfileWeights, WeightMap};
use crate::domain::BookSummary;

/// Upper bound on entries kept in each capped weight map
pub const MAX_PROFILE_ENTRIES: usize = 50;

/// The kinds of action that feed the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Like,
    Dislike,
    Save,
}

/// Per-category deltas contributed by one signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalDeltas {
    pub subject: i64,
    pub author: i64,
    /// `None` leaves the era map alone
    pub era: Option<i64>,
}

impl Signal {
    pub fn deltas(&self) -> SignalDeltas {
        match self {
            Signal::Like => SignalDeltas {
                subject: 2,
                author: 3,
                era: Some(1),
            },
            Signal::Dislike => SignalDeltas {
                subject: -1,
                author: -2,
                era: None,
            },
            Signal::Save => SignalDeltas {
                subject: 1,
                author: 0,
                era: None,
            },
        }
    }
}

/// Normalize a subject for use as a profile key (lowercase, trimmed)
pub fn normalize_subject(subject: &str) -> String {
    subject.to_lowercase().trim().to_string()
}

/// Apply one signal for `book` to `profile`, then cap the result.
pub fn apply_signal(profile: &ProfileWeights, book: &BookSummary, signal: Signal) -> ProfileWeights {
    let deltas = signal.deltas();
    let mut next = profile.clone();

    if deltas.subject != 0 {
        for subject in &book.subjects {
            let key = normalize_subject(subject);
            if !key.is_empty() {
                bump(&mut next.subjects, &key, deltas.subject);
            }
        }
    }

    if deltas.author != 0 {
        for author in &book.authors {
            if let Some(key) = author.profile_key() {
                bump(&mut next.authors, key, deltas.author);
            }
        }
    }

    if let (Some(delta), Some(year)) = (deltas.era, book.first_publish_year) {
        bump(&mut next.era, Era::from_year(year).as_str(), delta);
    }

    cap_profile(next)
}

/// Prune zero weights and keep the strongest entries of each capped map.
///
/// `length` is passed through untouched.
pub fn cap_profile(profile: ProfileWeights) -> ProfileWeights {
    ProfileWeights {
        subjects: cap_weights(profile.subjects, MAX_PROFILE_ENTRIES),
        authors: cap_weights(profile.authors, MAX_PROFILE_ENTRIES),
        length: profile.length,
        era: cap_weights(profile.era, MAX_PROFILE_ENTRIES),
    }
}

/// Drop zero entries, then keep the `limit` highest weights.
///
/// Ties are broken by key ascending: the map iterates in key order and the
/// sort is stable.
pub fn cap_weights(map: WeightMap, limit: usize) -> WeightMap {
    let mut entries: Vec<(String, i64)> = map.into_iter().filter(|(_, w)| *w != 0).collect();
    if entries.len() > limit {
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(limit);
    }
    entries.into_iter().collect()
}
