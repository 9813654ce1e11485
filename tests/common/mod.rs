#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use installment_core::{
    core::{FixedClock, TrackerManager},
    domain::PurchaseDraft,
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Allocates a fresh data directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Opens a manager over `home` with the clock pinned to `today`.
pub fn open_manager(home: &PathBuf, today: NaiveDate) -> TrackerManager {
    let storage = JsonStorage::new(Some(home.clone())).expect("create json storage backend");
    TrackerManager::open(Box::new(storage), Box::new(FixedClock::new(today)))
}

pub fn draft(name: &str, price: f64, installments: i64, category: &str, start: NaiveDate) -> PurchaseDraft {
    PurchaseDraft::new(name, price, installments, category, start)
}
