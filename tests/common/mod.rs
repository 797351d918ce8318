#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDate;
use spendwise::{
    session::{Session, User},
    store::{load_snapshot_from_path, InMemoryStore},
    utils::clock::FixedClock,
};
use spendwise_core::AggregationSettings;
use spendwise_domain::Snapshot;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Reference date the fixture is written around.
pub fn reference() -> NaiveDate {
    date(2024, 3, 10)
}

pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/snapshot.json")
}

pub fn fixture_snapshot() -> Snapshot {
    load_snapshot_from_path(&fixture_path()).expect("load fixture snapshot")
}

/// Store seeded with the fixture plus a session pinned to [`reference`].
pub fn connected_session() -> (InMemoryStore, Session, Arc<FixedClock>) {
    let store = InMemoryStore::with_snapshot(fixture_snapshot());
    let clock = Arc::new(FixedClock::new(reference()));
    let session = Session::connect(
        User::new("demo"),
        &store,
        clock.clone(),
        AggregationSettings::default(),
    );
    (store, session, clock)
}
