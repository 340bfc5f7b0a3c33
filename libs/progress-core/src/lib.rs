//! Review progress translation shared by the migrator.
//!
//! Provides:
//! - Review log aggregation (per scheduling unit summaries)
//! - Mapping of Anki scheduling state onto Pleco score records
//! - Vocabulary normalization and cross-store matching
//! - Shared types (Direction, Grade, SourceCard, TargetScoreRecord, etc.)

pub mod error;
pub mod matching;
pub mod revlog;
pub mod scoring;
pub mod types;

pub use error::{CoreError, Result};
pub use matching::{
    match_vocabulary, CoverageReport, Markers, MatchedWord, VocabularyIndex, VocabularyMatch,
};
pub use revlog::{ReviewLog, ReviewLogSummary};
pub use scoring::ScoreMapper;
pub use types::{
    Direction, Grade, HistoryEntry, ReviewEvent, SchedulingUnit, SourceCard, TargetScoreRecord,
    VocabularyEntry,
};
