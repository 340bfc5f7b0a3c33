//! Core types for review progress migration.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Study direction of a vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Reading: written form shown, meaning recalled.
    Recognition,
    /// Recall: meaning shown, written form produced.
    Production,
}

impl Direction {
    /// Both directions, in the order they are migrated.
    pub const ALL: [Direction; 2] = [Direction::Recognition, Direction::Production];

    /// Position of this direction in the source note's card template list.
    pub fn ordinal(self) -> i64 {
        match self {
            Self::Recognition => 0,
            Self::Production => 1,
        }
    }

    /// Get the direction name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recognition => "recognition",
            Self::Production => "production",
        }
    }
}

/// Outcome of one review on the source's 0..=4 ease scale.
///
/// 0 is a manual reschedule, 1 is "again", 2..=4 are the passing answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Grade(u8);

impl Grade {
    pub const MAX: u8 = 4;

    /// Validate a raw ease value read from the review log.
    pub fn new(value: i64) -> Result<Self> {
        if (0..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CoreError::InvalidGrade { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Written word with its store-scoped identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: i64,
    /// Form as stored, markers included.
    pub written: String,
    /// Form with marker characters removed; the cross-store join key.
    pub normalized: String,
}

/// One row of the source review log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewEvent {
    /// Epoch milliseconds; doubles as the event identifier.
    pub id: i64,
    pub unit_id: i64,
    pub grade: Grade,
}

/// Single (time, grade) pair kept for history rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub reviewed_at_ms: i64,
    pub grade: Grade,
}

/// Current scheduler state of one source card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingUnit {
    pub id: i64,
    pub queue: i64,
    /// Day number relative to collection creation when in the review queue.
    pub due: i64,
    pub interval: i64,
    /// Ease in permille (2500 = 250%).
    pub factor: i64,
}

/// Source-side card snapshot: scheduler state joined with its review log summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCard {
    pub unit_id: i64,
    pub direction: Direction,
    pub queue: i64,
    pub due: i64,
    pub interval: i64,
    pub factor: i64,
    /// Epoch seconds.
    pub first_reviewed: i64,
    /// Epoch seconds; 0 when never reviewed.
    pub last_reviewed: i64,
    pub successes: u32,
    pub failures: u32,
    /// Chronological, oldest first.
    pub history: Vec<HistoryEntry>,
}

/// Score fields of one Pleco score table row, minus the card key and
/// the change debounce counter the writer always resets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetScoreRecord {
    pub score: i64,
    pub difficulty: i64,
    pub history: String,
    pub correct: i64,
    pub incorrect: i64,
    pub reviewed: i64,
    pub first_reviewed_time: i64,
    pub last_reviewed_time: i64,
    pub score_inc_time: i64,
    pub score_dec_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_ordinals_follow_template_order() {
        assert_eq!(Direction::Recognition.ordinal(), 0);
        assert_eq!(Direction::Production.ordinal(), 1);
    }

    #[test]
    fn grade_accepts_full_ease_scale() {
        for value in 0..=4 {
            assert_eq!(Grade::new(value).unwrap().value() as i64, value);
        }
    }

    #[test]
    fn grade_rejects_out_of_range() {
        assert!(matches!(Grade::new(5), Err(CoreError::InvalidGrade { value: 5 })));
        assert!(matches!(Grade::new(-1), Err(CoreError::InvalidGrade { value: -1 })));
    }
}
