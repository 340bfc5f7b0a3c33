//! Migration pipeline: match vocabulary, aggregate reviews, map and write scores.

use std::fmt;

use chrono::{DateTime, Utc};
use progress_core::{
    match_vocabulary, CoverageReport, Direction, Markers, ReviewLog, ScoreMapper, VocabularyIndex,
};
use serde::Serialize;

use crate::db::{DbError, SourceStore, TargetStore};
use crate::reader::SourceCardReader;

/// Options that shape a migration run.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    pub markers: Markers,
    pub collection_created: i64,
    /// Read and map everything, write nothing.
    pub dry_run: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            collection_created: progress_core::scoring::ANKI_COLLECTION_CREATED,
            dry_run: false,
        }
    }
}

/// Outcome of a migration run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    pub coverage: CoverageReport,
    pub review_units: usize,
    pub review_events: usize,
    /// Score rows written (or that would be written on a dry run).
    pub records_written: usize,
    /// Written rows that replaced (or would replace) an existing row.
    pub records_replaced: usize,
    /// Matched words lacking a source card in one direction.
    pub units_skipped: usize,
    pub dry_run: bool,
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matched, {} missing from Pleco, {} missing from Anki; {} scores {} ({} replaced), {} skipped",
            self.coverage.matched.len(),
            self.coverage.missing_from_target.len(),
            self.coverage.missing_from_source.len(),
            self.records_written,
            if self.dry_run { "would be written" } else { "written" },
            self.records_replaced,
            self.units_skipped,
        )
    }
}

/// Copies review progress from a source store into a target store.
pub struct Migrator<'a, S, T> {
    source: &'a S,
    target: &'a T,
    mapper: ScoreMapper,
    options: MigrationOptions,
}

impl<'a, S: SourceStore, T: TargetStore> Migrator<'a, S, T> {
    pub fn new(source: &'a S, target: &'a T, options: MigrationOptions) -> Self {
        Self {
            source,
            target,
            mapper: ScoreMapper::new(options.collection_created),
            options,
        }
    }

    /// Run one full pass as of `now`. Any store error aborts the run; rows
    /// written before the failure stay written.
    pub fn run(&self, now: DateTime<Utc>) -> Result<MigrationReport, DbError> {
        tracing::info!("Reading vocabulary...");
        let source_words = VocabularyIndex::build(self.source.vocabulary(&self.options.markers)?);
        let target_words = VocabularyIndex::build(self.target.vocabulary(&self.options.markers)?);
        let vocabulary = match_vocabulary(&source_words, &target_words);
        log_coverage(&vocabulary.coverage);

        tracing::info!("Aggregating review log...");
        let review_log = ReviewLog::aggregate(self.source.review_events()?, now);
        let reader = SourceCardReader::new(self.source, review_log);

        let mut report = MigrationReport {
            review_units: reader.review_log().unit_count(),
            review_events: reader.review_log().total_events(),
            dry_run: self.options.dry_run,
            ..Default::default()
        };

        tracing::info!("Writing scores for {} words...", vocabulary.words.len());
        for word in &vocabulary.words {
            for direction in Direction::ALL {
                let Some(card) = reader.card(&word.source, direction)? else {
                    tracing::debug!(
                        word = %word.source.normalized,
                        direction = direction.as_str(),
                        "no Anki card, skipping"
                    );
                    report.units_skipped += 1;
                    continue;
                };

                let record = self.mapper.map(&card, now);
                tracing::debug!(
                    word = %word.source.normalized,
                    direction = direction.as_str(),
                    card = word.target.id,
                    score = record.score,
                    history = %record.history,
                    "mapped score"
                );

                let replaced = if self.options.dry_run {
                    self.target.has_score_record(word.target.id, direction)?
                } else {
                    self.target.replace_score_record(word.target.id, direction, &record)?
                };
                if replaced {
                    report.records_replaced += 1;
                }
                report.records_written += 1;
            }
        }

        tracing::info!(
            written = report.records_written,
            replaced = report.records_replaced,
            skipped = report.units_skipped,
            dry_run = report.dry_run,
            "Migration finished"
        );
        Ok(report)
    }
}

fn log_coverage(coverage: &CoverageReport) {
    for word in &coverage.missing_from_target {
        tracing::info!(word = %word, "not in Pleco");
    }
    for word in &coverage.missing_from_source {
        tracing::debug!(word = %word, "not in Anki");
    }

    if !coverage.missing_from_target.is_empty() {
        tracing::warn!(count = coverage.missing_from_target.len(), "Anki words missing from Pleco");
    }
    if !coverage.missing_from_source.is_empty() {
        tracing::warn!(count = coverage.missing_from_source.len(), "Pleco words missing from Anki");
    }
    if coverage.source_duplicates > 0 || coverage.target_duplicates > 0 {
        tracing::warn!(
            anki = coverage.source_duplicates,
            pleco = coverage.target_duplicates,
            "duplicate words ignored"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_summary_line() {
        let report = MigrationReport {
            coverage: CoverageReport {
                matched: vec!["書".into(), "好".into()],
                missing_from_target: vec!["他".into()],
                ..Default::default()
            },
            records_written: 3,
            records_replaced: 1,
            units_skipped: 1,
            ..Default::default()
        };
        assert_eq!(
            report.to_string(),
            "2 matched, 1 missing from Pleco, 0 missing from Anki; 3 scores written (1 replaced), 1 skipped"
        );
    }

    #[test]
    fn dry_run_summary_wording() {
        let report = MigrationReport {
            dry_run: true,
            ..Default::default()
        };
        assert!(report.to_string().contains("would be written"));
    }
}
