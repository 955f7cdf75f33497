#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, TimeZone, Utc};
use money_core::{core::Session, storage::JsonStorage};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_root() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// JSON storage backed by a fresh temp directory.
pub fn json_storage() -> (JsonStorage, PathBuf) {
    let root = temp_root();
    let storage = JsonStorage::new(Some(root.clone())).expect("create json storage backend");
    (storage, root)
}

/// Opens a session over `root`, as a restarted process would.
pub fn open_session_at(root: &Path) -> Session {
    let storage = JsonStorage::new(Some(root.to_path_buf())).expect("create json storage backend");
    Session::open(Box::new(storage))
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}
