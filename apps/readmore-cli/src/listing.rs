//! Books shown by the most recent search or recommendation listing
//!
//! Commands that take a work id look the book up here first, so a like or
//! save records the same summary the user just saw.

use readmore_core::domain::{BookSummary, WorkId};
use readmore_core::store::StoreError;
use std::fs;
use std::path::{Path, PathBuf};

const LISTING_FILE: &str = "last_listing.json";

pub struct ListingCache {
    path: PathBuf,
}

impl ListingCache {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(LISTING_FILE),
        }
    }

    /// Books from the last listing; empty if none was recorded or it is unreadable
    pub fn load(&self) -> Vec<BookSummary> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(books) => books,
            Err(e) => {
                tracing::warn!("Ignoring unreadable listing {:?}: {}", self.path, e);
                Vec::new()
            }
        }
    }

    /// Replace the cached listing
    pub fn store(&self, books: &[BookSummary]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(books)?)?;
        Ok(())
    }

    pub fn find(&self, id: &WorkId) -> Option<BookSummary> {
        self.load()
            .into_iter()
            .find(|book| book.work_id().as_ref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ListingCache::new(dir.path());
        let books = vec![
            BookSummary::new("OL1W").with_title("Beloved"),
            BookSummary::new(" OL2W ").with_title("Sula"),
        ];
        cache.store(&books).unwrap();

        let found = cache.find(&WorkId::parse("OL2W").unwrap()).unwrap();
        assert_eq!(found.title.as_deref(), Some("Sula"));
        assert!(cache.find(&WorkId::parse("OL3W").unwrap()).is_none());
    }

    #[test]
    fn test_unreadable_listing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LISTING_FILE), "[{").unwrap();
        assert!(ListingCache::new(dir.path()).load().is_empty());
    }
}
