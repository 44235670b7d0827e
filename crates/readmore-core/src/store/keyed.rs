//! Five-key layout over a string key/value backend

use super::{
    recover, StateStore, StoreError, DISLIKED_WORKS_KEY, LIKED_WORKS_KEY, PROFILE_KEY,
    SAVED_BOOKS_KEY, SAVED_WORKS_KEY,
};
use crate::state::UserState;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Minimal string key/value storage
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process backend
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw access for seeding and inspection
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    root: PathBuf,
}

impl DirectoryBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueBackend for DirectoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// The five top-level fields stored under independent keys.
///
/// Writes are per key, so a crash part-way through `save` can leave the keys
/// out of step; the next `load` then detects the broken shelf lockstep and
/// starts empty. Use [`super::SnapshotStore`] where that matters.
#[derive(Debug, Clone, Default)]
pub struct KeyedStore<B> {
    backend: B,
}

impl<B: KeyValueBackend> KeyedStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Read one key; an absent key decodes as the field's empty default.
    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, String> {
        match self.backend.get(key).map_err(|e| e.to_string())? {
            None => Ok(T::default()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| format!("{}: {}", key, e)),
        }
    }

    fn decode(&self) -> Result<UserState, String> {
        Ok(UserState {
            liked_works: self.read(LIKED_WORKS_KEY)?,
            disliked_works: self.read(DISLIKED_WORKS_KEY)?,
            saved_works: self.read(SAVED_WORKS_KEY)?,
            saved_books: self.read(SAVED_BOOKS_KEY)?,
            profile: self.read(PROFILE_KEY)?,
        })
    }
}

impl<B: KeyValueBackend> StateStore for KeyedStore<B> {
    fn load(&self) -> UserState {
        recover(self.decode(), "keyed store")
    }

    fn save(&mut self, state: &UserState) -> Result<(), StoreError> {
        self.backend
            .set(LIKED_WORKS_KEY, &serde_json::to_string(&state.liked_works)?)?;
        self.backend
            .set(DISLIKED_WORKS_KEY, &serde_json::to_string(&state.disliked_works)?)?;
        self.backend
            .set(SAVED_WORKS_KEY, &serde_json::to_string(&state.saved_works)?)?;
        self.backend
            .set(SAVED_BOOKS_KEY, &serde_json::to_string(&state.saved_books)?)?;
        self.backend
            .set(PROFILE_KEY, &serde_json::to_string(&state.profile)?)?;
        tracing::debug!("Saved state under readmore_* keys ({} saved)", state.saved_works.len());
        Ok(())
    }
}
