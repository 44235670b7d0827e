//! Persistence across sessions, for both storage layouts

mod common;

use common::fixtures::{bare, hobbit, three_body};
use readmore_core::config::{StorageConfig, StorageLayout};
use readmore_core::engine::Engine;
use readmore_core::state::{RatingControl, UserState};
use readmore_core::store::{
    DirectoryBackend, KeyValueBackend, KeyedStore, SnapshotStore, StateStore, LIKED_WORKS_KEY,
    SAVED_BOOKS_KEY, SAVED_WORKS_KEY,
};
use std::fs;
use tempfile::TempDir;

fn storage(dir: &TempDir, layout: StorageLayout) -> StorageConfig {
    StorageConfig {
        layout,
        data_dir: Some(dir.path().to_path_buf()),
    }
}

#[test]
fn test_state_survives_new_session() {
    for layout in [StorageLayout::Snapshot, StorageLayout::Keyed] {
        let dir = TempDir::new().unwrap();

        let written = {
            let mut engine = Engine::new(storage(&dir, layout).open_store());
            engine.like(hobbit()).unwrap();
            engine.save(three_body()).unwrap();
            engine.dislike(bare("OL5W")).unwrap()
        };

        let engine = Engine::new(storage(&dir, layout).open_store());
        assert_eq!(engine.state(), written, "layout {:?}", layout);
        assert_eq!(engine.state().saved_books[0].title.as_deref(), Some("The Three-Body Problem"));
    }
}

#[test]
fn test_keyed_layout_writes_one_file_per_key() {
    let dir = TempDir::new().unwrap();
    let mut engine = Engine::new(KeyedStore::new(DirectoryBackend::new(dir.path())));
    engine.save(hobbit()).unwrap();

    for key in [LIKED_WORKS_KEY, SAVED_WORKS_KEY, SAVED_BOOKS_KEY] {
        assert!(dir.path().join(format!("{}.json", key)).exists(), "{}", key);
    }

    let raw = fs::read_to_string(dir.path().join(format!("{}.json", SAVED_WORKS_KEY))).unwrap();
    let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(ids, vec!["OL27482W".to_string()]);
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "{ not json").unwrap();

    let mut engine = Engine::new(SnapshotStore::new(&path));
    assert_eq!(engine.state(), UserState::empty());

    // The next action overwrites the unreadable file
    let state = engine.like(hobbit()).unwrap();
    assert_eq!(SnapshotStore::new(&path).load(), state);
}

#[test]
fn test_keys_out_of_step_start_empty() {
    let dir = TempDir::new().unwrap();
    let mut store = KeyedStore::new(DirectoryBackend::new(dir.path()));
    let mut engine = Engine::new(KeyedStore::new(DirectoryBackend::new(dir.path())));
    engine.save(hobbit()).unwrap();

    // Simulate a save interrupted after the id list but before the records
    store
        .backend_mut()
        .set(SAVED_WORKS_KEY, r#"["OL27482W","OL2W"]"#)
        .unwrap();
    assert_eq!(store.load(), UserState::empty());
}

#[test]
fn test_overlapping_ratings_start_empty() {
    let dir = TempDir::new().unwrap();
    let mut backend = DirectoryBackend::new(dir.path());
    backend.set(LIKED_WORKS_KEY, r#"["OL1W"]"#).unwrap();
    backend
        .set(readmore_core::store::DISLIKED_WORKS_KEY, r#"["OL1W"]"#)
        .unwrap();

    assert_eq!(KeyedStore::new(backend).load(), UserState::empty());
}

#[test]
fn test_subscribers_see_each_action() {
    let dir = TempDir::new().unwrap();
    let mut engine = Engine::new(SnapshotStore::new(dir.path().join("state.json")));
    let rx = engine.subscribe();

    engine.toggle(hobbit(), RatingControl::Like).unwrap();
    engine.toggle(hobbit(), RatingControl::Like).unwrap();
    engine.remove_from_shelf("OL404W").unwrap();

    let events: Vec<_> = rx.try_iter().collect();
    let names: Vec<&str> = events.iter().map(|e| e.action).collect();
    assert_eq!(names, vec!["toggle-like", "toggle-like", "remove-from-shelf"]);
    assert!(events[0].state.liked_works.len() == 1);
    assert!(events[1].state.liked_works.is_empty());
    assert_eq!(events[2].state, engine.state());
}
