//! Shared constants and time helpers for fixtures.

use chrono::{DateTime, TimeZone, Utc};
use progress_core::scoring::{ANKI_COLLECTION_CREATED, SECONDS_PER_DAY};

pub const NOTE_TYPE_ID: i64 = 1_519_180_062_633;

/// Ten days after the Anki collection was created.
pub fn now() -> DateTime<Utc> {
    at(ANKI_COLLECTION_CREATED + 10 * SECONDS_PER_DAY)
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Review log id for an event at `secs`.
pub fn review_id(secs: i64) -> i64 {
    secs * 1000
}
