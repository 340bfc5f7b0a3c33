//! Adapter for a Pleco flashcard database.

use std::path::Path;

use progress_core::{Direction, Markers, TargetScoreRecord, VocabularyEntry};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};

use crate::db::error::DbError;
use crate::db::repository::TargetStore;
use crate::db::schema::{ensure_tables, PLECO_TABLES};

type Result<T> = std::result::Result<T, DbError>;

/// Score table holding the given direction's scores.
pub fn score_table(direction: Direction) -> &'static str {
    match direction {
        Direction::Recognition => "pleco_flash_scores_1",
        Direction::Production => "pleco_flash_scores_2",
    }
}

/// Score row as stored, with its key and debounce counter.
///
/// Pleco leaves columns NULL on rows it has never scored; those read as 0
/// (or an empty history).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredScore {
    pub card: i64,
    pub record: TargetScoreRecord,
    pub since_last_change: i64,
}

impl StoredScore {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let int = |idx: usize| -> rusqlite::Result<i64> {
            Ok(row.get::<_, Option<i64>>(idx)?.unwrap_or(0))
        };

        Ok(Self {
            card: row.get(0)?,
            record: TargetScoreRecord {
                score: int(1)?,
                difficulty: int(2)?,
                history: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                correct: int(4)?,
                incorrect: int(5)?,
                reviewed: int(6)?,
                first_reviewed_time: int(7)?,
                last_reviewed_time: int(8)?,
                score_inc_time: int(9)?,
                score_dec_time: int(10)?,
            },
            since_last_change: int(11)?,
        })
    }
}

pub struct PlecoStore {
    conn: Connection,
}

impl PlecoStore {
    /// Open an existing database for writing. Never creates a new file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        Self::from_connection(conn)
    }

    /// Wrap an already open connection (used with in-memory fixtures).
    pub fn from_connection(conn: Connection) -> Result<Self> {
        ensure_tables(&conn, &PLECO_TABLES)?;
        Ok(Self { conn })
    }

    /// Read back the score row of `card` for a direction.
    pub fn get_score_record(&self, card: i64, direction: Direction) -> Result<Option<StoredScore>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT card, score, difficulty, history, correct, incorrect, reviewed,
                        firstreviewedtime, lastreviewedtime, scoreinctime, scoredectime,
                        sincelastchange
                     FROM {} WHERE card = ?1",
                    score_table(direction)
                ),
                params![card],
                StoredScore::from_row,
            )
            .optional()
            .map_err(Into::into)
    }
}

impl TargetStore for PlecoStore {
    fn vocabulary(&self, markers: &Markers) -> Result<Vec<VocabularyEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, hw FROM pleco_flash_cards ORDER BY id")?;

        let entries = stmt
            .query_map([], |row| Ok(markers.entry(row.get(0)?, row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn has_score_record(&self, card: i64, direction: Direction) -> Result<bool> {
        let exists = self.conn.query_row(
            &format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE card = ?1)",
                score_table(direction)
            ),
            params![card],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn replace_score_record(
        &self,
        card: i64,
        direction: Direction,
        record: &TargetScoreRecord,
    ) -> Result<bool> {
        let table = score_table(direction);
        let tx = self.conn.unchecked_transaction()?;

        let removed = tx.execute(&format!("DELETE FROM {} WHERE card = ?1", table), params![card])?;
        tx.execute(
            &format!(
                "INSERT INTO {} (card, score, difficulty, history, correct, incorrect, reviewed,
                    firstreviewedtime, lastreviewedtime, scoreinctime, scoredectime,
                    sincelastchange)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0)",
                table
            ),
            params![
                card,
                record.score,
                record.difficulty,
                record.history,
                record.correct,
                record.incorrect,
                record.reviewed,
                record.first_reviewed_time,
                record.last_reviewed_time,
                record.score_inc_time,
                record.score_dec_time,
            ],
        )?;

        tx.commit()?;
        Ok(removed > 0)
    }
}
