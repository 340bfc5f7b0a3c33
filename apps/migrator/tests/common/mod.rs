//! Common test utilities for integration tests.
//!
//! Builds in-memory Anki and Pleco stores from the adapters' schemas so the
//! whole pipeline can run without files on disk.

pub mod fixtures;

use anki_to_pleco::db::schema::{ANKI_SCHEMA, PLECO_SCHEMA};
use anki_to_pleco::db::{AnkiStore, PlecoStore};
use progress_core::Direction;
use rusqlite::{params, Connection};

use fixtures::NOTE_TYPE_ID;

/// Raw connections to seed before handing them to the adapters.
pub struct Fixture {
    pub anki: Connection,
    pub pleco: Connection,
}

impl Fixture {
    pub fn new() -> Self {
        let anki = Connection::open_in_memory().expect("Failed to open Anki fixture");
        anki.execute_batch(ANKI_SCHEMA).expect("Failed to create Anki schema");

        let pleco = Connection::open_in_memory().expect("Failed to open Pleco fixture");
        pleco.execute_batch(PLECO_SCHEMA).expect("Failed to create Pleco schema");

        Self { anki, pleco }
    }

    /// Add a note of the migrated note type.
    pub fn note(&self, id: i64, word: &str) -> &Self {
        self.note_of_type(id, NOTE_TYPE_ID, word)
    }

    pub fn note_of_type(&self, id: i64, note_type: i64, word: &str) -> &Self {
        self.anki
            .execute(
                "INSERT INTO notes (id, mid, sfld) VALUES (?1, ?2, ?3)",
                params![id, note_type, word],
            )
            .expect("Failed to insert note");
        self
    }

    pub fn card(
        &self,
        id: i64,
        note_id: i64,
        direction: Direction,
        queue: i64,
        due: i64,
        factor: i64,
    ) -> &Self {
        self.anki
            .execute(
                "INSERT INTO cards (id, nid, ord, queue, due, ivl, factor)
                 VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
                params![id, note_id, direction.ordinal(), queue, due, factor],
            )
            .expect("Failed to insert card");
        self
    }

    pub fn review(&self, at_ms: i64, card_id: i64, ease: i64) -> &Self {
        self.anki
            .execute(
                "INSERT INTO revlog (id, cid, ease) VALUES (?1, ?2, ?3)",
                params![at_ms, card_id, ease],
            )
            .expect("Failed to insert review");
        self
    }

    pub fn pleco_word(&self, id: i64, headword: &str) -> &Self {
        self.pleco
            .execute(
                "INSERT INTO pleco_flash_cards (id, hw) VALUES (?1, ?2)",
                params![id, headword],
            )
            .expect("Failed to insert Pleco word");
        self
    }

    /// Hand the seeded connections to the store adapters.
    pub fn stores(self) -> (AnkiStore, PlecoStore) {
        let source = AnkiStore::from_connection(self.anki, NOTE_TYPE_ID)
            .expect("Failed to wrap Anki fixture");
        let target = PlecoStore::from_connection(self.pleco).expect("Failed to wrap Pleco fixture");
        (source, target)
    }
}
