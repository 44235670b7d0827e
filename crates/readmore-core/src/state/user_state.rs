//! The persisted aggregate

use crate::domain::book::null_as_default;
use crate::domain::{SavedBook, WorkId};
use crate::profile::ProfileWeights;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Insertion-ordered set of work ids, most recent last
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WorkSet(Vec<WorkId>);

impl WorkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &WorkId) -> bool {
        self.0.contains(id)
    }

    /// Insert `id` at the end, removing any earlier occurrence
    pub fn move_to_end(&mut self, id: &WorkId) {
        self.0.retain(|existing| existing != id);
        self.0.push(id.clone());
    }

    /// Append `id` unless present. Returns false when it was already there.
    pub fn insert(&mut self, id: &WorkId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id.clone());
        true
    }

    /// Returns true if `id` was present
    pub fn remove(&mut self, id: &WorkId) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != id);
        self.0.len() != before
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkId> {
        self.0.iter()
    }

    fn first_duplicate(&self) -> Option<&WorkId> {
        let mut seen = HashSet::new();
        self.0.iter().find(|id| !seen.insert(*id))
    }
}

impl FromIterator<WorkId> for WorkSet {
    fn from_iter<T: IntoIterator<Item = WorkId>>(iter: T) -> Self {
        let mut set = WorkSet::new();
        for id in iter {
            set.insert(&id);
        }
        set
    }
}

/// A broken consistency rule found in a decoded state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("work {0} is both liked and disliked")]
    LikedAndDisliked(WorkId),
    #[error("work {id} appears more than once in {set}")]
    Duplicate { set: &'static str, id: WorkId },
    #[error("work {0} is saved but has no shelf record")]
    MissingShelfRecord(WorkId),
    #[error("shelf record {0} has no saved work")]
    OrphanShelfRecord(WorkId),
}

/// Everything the client remembers about the user
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_works: WorkSet,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disliked_works: WorkSet,
    #[serde(default, deserialize_with = "null_as_default")]
    pub saved_works: WorkSet,
    #[serde(default, deserialize_with = "null_as_default")]
    pub saved_books: Vec<SavedBook>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile: ProfileWeights,
}

impl UserState {
    /// The all-empty state used on first run and after corruption
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_liked(&self, id: &WorkId) -> bool {
        self.liked_works.contains(id)
    }

    pub fn is_disliked(&self, id: &WorkId) -> bool {
        self.disliked_works.contains(id)
    }

    pub fn is_saved(&self, id: &WorkId) -> bool {
        self.saved_works.contains(id)
    }

    /// Shelf record for `id`, if saved
    pub fn saved_book(&self, id: &WorkId) -> Option<&SavedBook> {
        self.saved_books.iter().find(|b| &b.work_id == id)
    }

    /// Check the consistency rules every reachable state satisfies.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (name, set) in [
            ("likedWorks", &self.liked_works),
            ("dislikedWorks", &self.disliked_works),
            ("savedWorks", &self.saved_works),
        ] {
            if let Some(id) = set.first_duplicate() {
                return Err(InvariantViolation::Duplicate {
                    set: name,
                    id: id.clone(),
                });
            }
        }

        if let Some(id) = self.liked_works.iter().find(|id| self.is_disliked(id)) {
            return Err(InvariantViolation::LikedAndDisliked(id.clone()));
        }

        let mut shelf_ids = HashSet::new();
        for book in &self.saved_books {
            if !shelf_ids.insert(&book.work_id) {
                return Err(InvariantViolation::Duplicate {
                    set: "savedBooks",
                    id: book.work_id.clone(),
                });
            }
            if !self.is_saved(&book.work_id) {
                return Err(InvariantViolation::OrphanShelfRecord(book.work_id.clone()));
            }
        }
        if let Some(id) = self.saved_works.iter().find(|id| !shelf_ids.contains(id)) {
            return Err(InvariantViolation::MissingShelfRecord(id.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> WorkId {
        WorkId::parse(raw).unwrap()
    }

    #[test]
    fn test_move_to_end() {
        let mut set: WorkSet = [id("a"), id("b"), id("c")].into_iter().collect();
        set.move_to_end(&id("a"));
        let ids: Vec<&str> = set.iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = WorkSet::new();
        assert!(set.insert(&id("a")));
        assert!(!set.insert(&id("a")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        let json = serde_json::to_value(UserState::empty()).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["likedWorks", "dislikedWorks", "savedWorks", "savedBooks", "profile"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
    }

    #[test]
    fn test_overlap_detected() {
        let mut state = UserState::empty();
        state.liked_works.insert(&id("a"));
        state.disliked_works.insert(&id("a"));
        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::LikedAndDisliked(id("a")))
        );
    }

    #[test]
    fn test_lockstep_detected() {
        let mut state = UserState::empty();
        state.saved_works.insert(&id("a"));
        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::MissingShelfRecord(id("a")))
        );
    }

    #[test]
    fn test_duplicate_in_decoded_set_detected() {
        let state: UserState =
            serde_json::from_str(r#"{"likedWorks": ["a", "a"]}"#).unwrap();
        assert!(matches!(
            state.check_invariants(),
            Err(InvariantViolation::Duplicate { set: "likedWorks", .. })
        ));
    }
}
