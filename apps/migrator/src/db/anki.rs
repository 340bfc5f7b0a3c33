//! Read-only adapter for an Anki collection.

use std::path::Path;

use progress_core::{Direction, Grade, Markers, ReviewEvent, SchedulingUnit, VocabularyEntry};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::db::error::DbError;
use crate::db::repository::SourceStore;
use crate::db::schema::{ensure_tables, ANKI_TABLES};

type Result<T> = std::result::Result<T, DbError>;

/// Note type of the Chinese vocabulary deck being migrated.
pub const DEFAULT_NOTE_TYPE_ID: i64 = 1_519_180_062_633;

pub struct AnkiStore {
    conn: Connection,
    note_type_id: i64,
}

impl AnkiStore {
    /// Open a collection file read-only.
    pub fn open<P: AsRef<Path>>(path: P, note_type_id: i64) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Self::from_connection(conn, note_type_id)
    }

    /// Wrap an already open connection (used with in-memory fixtures).
    pub fn from_connection(conn: Connection, note_type_id: i64) -> Result<Self> {
        ensure_tables(&conn, &ANKI_TABLES)?;
        Ok(Self { conn, note_type_id })
    }

    pub fn note_type_id(&self) -> i64 {
        self.note_type_id
    }
}

impl SourceStore for AnkiStore {
    fn vocabulary(&self, markers: &Markers) -> Result<Vec<VocabularyEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, sfld FROM notes WHERE mid = ?1 ORDER BY id")?;

        let mut rows = stmt.query(params![self.note_type_id])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let id: i64 = row.get(0)?;
            let written = sort_field_text(row.get_ref(1)?).ok_or_else(|| {
                DbError::InvalidData(format!("note {} has a non-text sort field", id))
            })?;
            entries.push(markers.entry(id, written));
        }

        Ok(entries)
    }

    fn review_events(&self) -> Result<Vec<ReviewEvent>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, cid, ease FROM revlog ORDER BY id")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, i64>(2)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, unit_id, ease)| {
                let grade = Grade::new(ease)
                    .map_err(|e| DbError::InvalidData(format!("revlog {}: {}", id, e)))?;
                Ok(ReviewEvent { id, unit_id, grade })
            })
            .collect()
    }

    fn scheduling_unit(
        &self,
        entry_id: i64,
        direction: Direction,
    ) -> Result<Option<SchedulingUnit>> {
        self.conn
            .query_row(
                "SELECT id, queue, due, ivl, factor FROM cards
                 WHERE nid = ?1 AND ord = ?2 ORDER BY id LIMIT 1",
                params![entry_id, direction.ordinal()],
                |row| {
                    Ok(SchedulingUnit {
                        id: row.get(0)?,
                        queue: row.get(1)?,
                        due: row.get(2)?,
                        interval: row.get(3)?,
                        factor: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }
}

/// Anki stores numeric sort fields as numbers, everything else as text.
fn sort_field_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}
