pub mod config;
pub mod db;
pub mod pipeline;
pub mod reader;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Cli, MigrationConfig};
use crate::db::{AnkiStore, PlecoStore};
use crate::pipeline::Migrator;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = MigrationConfig::from_cli(Cli::parse())?;

    tracing::info!("Opening Anki collection {}", config.anki_path.display());
    let source = AnkiStore::open(&config.anki_path, config.note_type_id)
        .with_context(|| format!("failed to open Anki collection {}", config.anki_path.display()))?;
    tracing::debug!(note_type = source.note_type_id(), "Anki note type");

    tracing::info!("Opening Pleco database {}", config.pleco_path.display());
    let target = PlecoStore::open(&config.pleco_path)
        .with_context(|| format!("failed to open Pleco database {}", config.pleco_path.display()))?;

    let report = Migrator::new(&source, &target, config.options.clone()).run(Utc::now())?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
