//! Repository traits for the two stores.

use progress_core::{
    Direction, Markers, ReviewEvent, SchedulingUnit, TargetScoreRecord, VocabularyEntry,
};

use crate::db::error::DbError;

type Result<T> = std::result::Result<T, DbError>;

/// Read-only access to the store progress is migrated from.
pub trait SourceStore {
    /// Vocabulary entries of the configured note type, ascending id.
    fn vocabulary(&self, markers: &Markers) -> Result<Vec<VocabularyEntry>>;
    /// The complete review log, ascending event id.
    fn review_events(&self) -> Result<Vec<ReviewEvent>>;
    /// Scheduler row of an entry's card for a direction, if the card exists.
    fn scheduling_unit(
        &self,
        entry_id: i64,
        direction: Direction,
    ) -> Result<Option<SchedulingUnit>>;
}

/// Access to the store progress is migrated into.
pub trait TargetStore {
    /// Vocabulary entries, ascending id.
    fn vocabulary(&self, markers: &Markers) -> Result<Vec<VocabularyEntry>>;
    /// Whether `card` already has a score row for a direction.
    fn has_score_record(&self, card: i64, direction: Direction) -> Result<bool>;
    /// Replace the score row of `card` for a direction. Returns whether a
    /// previous row was removed.
    fn replace_score_record(
        &self,
        card: i64,
        direction: Direction,
        record: &TargetScoreRecord,
    ) -> Result<bool>;
}
