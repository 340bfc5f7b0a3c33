//! Review log aggregation.
//!
//! The full review log is folded once per run into one summary per
//! scheduling unit. Nothing is cached between runs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Direction, Grade, HistoryEntry, ReviewEvent, SchedulingUnit, SourceCard};

/// Grades below this count as failures in the summary counters.
const FAILURE_THRESHOLD: u8 = 2;

/// Aggregate over every review event of one scheduling unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewLogSummary {
    /// Earliest event in epoch ms; the aggregation time when never reviewed.
    pub first_ms: i64,
    /// Latest event in epoch ms; 0 when never reviewed.
    pub last_ms: i64,
    pub successes: u32,
    pub failures: u32,
    /// Events in arrival order.
    pub entries: Vec<HistoryEntry>,
}

impl ReviewLogSummary {
    /// Summary of a unit with no events, seeded so that first > last.
    pub fn empty(now_ms: i64) -> Self {
        Self {
            first_ms: now_ms,
            last_ms: 0,
            successes: 0,
            failures: 0,
            entries: Vec::new(),
        }
    }

    /// Fold one event into the summary.
    pub fn record(&mut self, reviewed_at_ms: i64, grade: Grade) {
        self.entries.push(HistoryEntry { reviewed_at_ms, grade });
        self.first_ms = self.first_ms.min(reviewed_at_ms);
        self.last_ms = self.last_ms.max(reviewed_at_ms);
        if grade.value() < FAILURE_THRESHOLD {
            self.failures += 1;
        } else {
            self.successes += 1;
        }
    }

    pub fn first_reviewed_secs(&self) -> i64 {
        self.first_ms / 1000
    }

    pub fn last_reviewed_secs(&self) -> i64 {
        self.last_ms / 1000
    }

    /// Join with a scheduler row to build the source card snapshot.
    pub fn join(&self, unit: SchedulingUnit, direction: Direction) -> SourceCard {
        SourceCard {
            unit_id: unit.id,
            direction,
            queue: unit.queue,
            due: unit.due,
            interval: unit.interval,
            factor: unit.factor,
            first_reviewed: self.first_reviewed_secs(),
            last_reviewed: self.last_reviewed_secs(),
            successes: self.successes,
            failures: self.failures,
            history: self.entries.clone(),
        }
    }
}

/// Per-unit summaries of one store's complete review log.
#[derive(Debug, Clone)]
pub struct ReviewLog {
    now_ms: i64,
    summaries: HashMap<i64, ReviewLogSummary>,
    total_events: usize,
}

impl ReviewLog {
    /// Fold every event, in the order given, into per-unit summaries.
    pub fn aggregate<I>(events: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = ReviewEvent>,
    {
        let now_ms = now.timestamp_millis();
        let mut summaries: HashMap<i64, ReviewLogSummary> = HashMap::new();
        let mut total_events = 0;

        for event in events {
            summaries
                .entry(event.unit_id)
                .or_insert_with(|| ReviewLogSummary::empty(now_ms))
                .record(event.id, event.grade);
            total_events += 1;
        }

        Self {
            now_ms,
            summaries,
            total_events,
        }
    }

    pub fn get(&self, unit_id: i64) -> Option<&ReviewLogSummary> {
        self.summaries.get(&unit_id)
    }

    /// Summary for a unit, or the never-reviewed summary if it has no events.
    pub fn summary_for(&self, unit_id: i64) -> ReviewLogSummary {
        self.get(unit_id)
            .cloned()
            .unwrap_or_else(|| ReviewLogSummary::empty(self.now_ms))
    }

    /// Number of units with at least one event.
    pub fn unit_count(&self) -> usize {
        self.summaries.len()
    }

    pub fn total_events(&self) -> usize {
        self.total_events
    }
}
