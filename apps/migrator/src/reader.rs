//! Source card lookup joined with the run's review log.

use progress_core::{Direction, ReviewLog, SourceCard, VocabularyEntry};

use crate::db::{DbError, SourceStore};

/// Builds source card snapshots from scheduler rows and the aggregated review log.
pub struct SourceCardReader<'a, S> {
    store: &'a S,
    review_log: ReviewLog,
}

impl<'a, S: SourceStore> SourceCardReader<'a, S> {
    pub fn new(store: &'a S, review_log: ReviewLog) -> Self {
        Self { store, review_log }
    }

    pub fn review_log(&self) -> &ReviewLog {
        &self.review_log
    }

    /// Snapshot of the entry's card for a direction, or `None` when the note
    /// has no card in that direction.
    pub fn card(
        &self,
        entry: &VocabularyEntry,
        direction: Direction,
    ) -> Result<Option<SourceCard>, DbError> {
        let Some(unit) = self.store.scheduling_unit(entry.id, direction)? else {
            return Ok(None);
        };
        let summary = self.review_log.summary_for(unit.id);
        Ok(Some(summary.join(unit, direction)))
    }
}
