//! Table layouts of the two stores, limited to the columns this tool touches.
//!
//! The real files are created by Anki and Pleco; these definitions are what
//! the adapters are checked against and what fixture stores are built from.

use rusqlite::{params, Connection};

use super::error::DbError;

/// Anki collection tables read by the migrator.
pub const ANKI_TABLES: [&str; 3] = ["notes", "cards", "revlog"];

/// Pleco tables read and written by the migrator.
pub const PLECO_TABLES: [&str; 3] = [
    "pleco_flash_cards",
    "pleco_flash_scores_1",
    "pleco_flash_scores_2",
];

/// Minimal Anki collection schema.
pub const ANKI_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY,
    mid INTEGER NOT NULL,
    sfld TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cards (
    id INTEGER PRIMARY KEY,
    nid INTEGER NOT NULL,
    ord INTEGER NOT NULL,
    queue INTEGER NOT NULL,
    due INTEGER NOT NULL,
    ivl INTEGER NOT NULL,
    factor INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS revlog (
    id INTEGER PRIMARY KEY,
    cid INTEGER NOT NULL,
    ease INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS ix_cards_nid ON cards (nid);
"#;

/// Minimal Pleco flashcard schema.
pub const PLECO_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS pleco_flash_cards (
    id INTEGER PRIMARY KEY,
    hw TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pleco_flash_scores_1 (
    card INTEGER,
    score INTEGER,
    difficulty INTEGER,
    history TEXT,
    correct INTEGER,
    incorrect INTEGER,
    reviewed INTEGER,
    firstreviewedtime INTEGER,
    lastreviewedtime INTEGER,
    scoreinctime INTEGER,
    scoredectime INTEGER,
    sincelastchange INTEGER
);

CREATE TABLE IF NOT EXISTS pleco_flash_scores_2 (
    card INTEGER,
    score INTEGER,
    difficulty INTEGER,
    history TEXT,
    correct INTEGER,
    incorrect INTEGER,
    reviewed INTEGER,
    firstreviewedtime INTEGER,
    lastreviewedtime INTEGER,
    scoreinctime INTEGER,
    scoredectime INTEGER,
    sincelastchange INTEGER
);
"#;

/// Fail with `MissingTable` for the first table not present in the database.
pub fn ensure_tables(conn: &Connection, tables: &[&'static str]) -> Result<(), DbError> {
    for &table in tables {
        let found: bool = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![table],
            |row| row.get(0),
        )?;
        if !found {
            return Err(DbError::MissingTable(table));
        }
    }
    Ok(())
}
