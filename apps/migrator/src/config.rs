//! Command line and environment configuration.

use std::path::PathBuf;

use anyhow::ensure;
use clap::Parser;
use progress_core::scoring::ANKI_COLLECTION_CREATED;
use progress_core::Markers;

use crate::db::anki::DEFAULT_NOTE_TYPE_ID;
use crate::pipeline::MigrationOptions;

#[derive(Debug, Parser)]
#[command(name = "anki-to-pleco")]
#[command(about = "Copy Anki review progress into Pleco flashcard scores", long_about = None)]
pub struct Cli {
    /// Anki collection file (opened read-only)
    #[arg(long, env = "ANKI_DB_PATH", default_value = "anki.sqlite3")]
    pub anki: PathBuf,

    /// Pleco flashcard database
    #[arg(long, env = "PLECO_DB_PATH", default_value = "pleco.sqlite3")]
    pub pleco: PathBuf,

    /// Anki note type whose notes are migrated
    #[arg(long = "note-type", env = "ANKI_NOTE_TYPE_ID", default_value_t = DEFAULT_NOTE_TYPE_ID)]
    pub note_type: i64,

    /// Characters stripped from Pleco headwords before matching
    #[arg(long, env = "PLECO_MARKERS", default_value = "@")]
    pub markers: String,

    /// Anki collection creation time, epoch seconds
    #[arg(
        long = "collection-created",
        env = "ANKI_COLLECTION_CREATED",
        default_value_t = ANKI_COLLECTION_CREATED
    )]
    pub collection_created: i64,

    /// Compute scores without writing to Pleco
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Validated configuration of one run.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub anki_path: PathBuf,
    pub pleco_path: PathBuf,
    pub note_type_id: i64,
    pub options: MigrationOptions,
    pub json: bool,
}

impl MigrationConfig {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        ensure!(cli.anki.is_file(), "Anki collection not found at {}", cli.anki.display());
        ensure!(cli.pleco.is_file(), "Pleco database not found at {}", cli.pleco.display());

        Ok(Self {
            anki_path: cli.anki,
            pleco_path: cli.pleco,
            note_type_id: cli.note_type,
            options: MigrationOptions {
                markers: Markers::from(cli.markers.as_str()),
                collection_created: cli.collection_created,
                dry_run: cli.dry_run,
            },
            json: cli.json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "anki-to-pleco",
            "--anki",
            "a.db",
            "--pleco",
            "p.db",
            "--note-type",
            "42",
            "--markers",
            "@#",
            "--collection-created",
            "0",
            "--dry-run",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.anki, PathBuf::from("a.db"));
        assert_eq!(cli.pleco, PathBuf::from("p.db"));
        assert_eq!(cli.note_type, 42);
        assert_eq!(cli.markers, "@#");
        assert_eq!(cli.collection_created, 0);
        assert!(cli.dry_run);
        assert!(cli.json);
    }

    #[test]
    fn missing_collection_rejected() {
        let cli = Cli::try_parse_from([
            "anki-to-pleco",
            "--anki",
            "/nonexistent/anki.sqlite3",
            "--pleco",
            "/nonexistent/pleco.sqlite3",
        ])
        .unwrap();

        let err = MigrationConfig::from_cli(cli).unwrap_err();
        assert!(err.to_string().contains("Anki collection not found"));
    }
}
