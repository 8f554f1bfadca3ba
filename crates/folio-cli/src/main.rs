// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio — command-line front end.
//
// Imports scanned pages into the local store, suggests chapters, applies an
// approved reorganization, and prints the book export payload. JSON goes to
// stdout; logs go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use folio_book::BookAssembler;
use folio_chapters::{ReorganizationPlanner, apply_reorganization_concurrently};
use folio_core::error::{FolioError, Result};
use folio_core::human_errors::humanize_error;
use folio_core::types::{Classification, Page, ProjectId, ProjectInfo, ProjectType};
use folio_core::FolioConfig;
use folio_store::ProjectStore;

const DEFAULT_DB: &str = "folio.db";

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Organize scanned pages into chapters and export them as a book")]
struct Cli {
    #[arg(long, global = true, env = "FOLIO_CONFIG", help = "JSON configuration file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, env = "FOLIO_DB", help = "SQLite database [default: folio.db]")]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load pages from a JSON array into a project, replacing its pages.
    Import {
        project_id: String,
        #[arg(help = "JSON file with the project's pages")]
        pages: PathBuf,
        #[arg(long, help = "Project title [default: existing title or project id]")]
        title: Option<String>,
        #[arg(long = "type", help = "recipe, letter, journal, or generic")]
        project_type: Option<String>,
    },
    /// Print suggested chapters for a project.
    Suggest { project_id: String },
    /// Apply an approved suggestion: renumber pages and rebuild chapters.
    Apply {
        project_id: String,
        #[arg(help = "Suggestion JSON as printed by `folio suggest`")]
        suggestion: PathBuf,
    },
    /// Print the book export payload.
    Export { project_id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let human = humanize_error(&err);
            debug!(error = %err, "command failed");
            eprintln!("{}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => FolioConfig::load(path)?,
        None => FolioConfig::default(),
    };
    let db_path = cli
        .db
        .clone()
        .or_else(|| config.database_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB));
    let store = ProjectStore::open(&db_path)?;

    match cli.command {
        Commands::Import {
            project_id,
            pages,
            title,
            project_type,
        } => import(&store, ProjectId::new(project_id), &pages, title, project_type),
        Commands::Suggest { project_id } => {
            let id = ProjectId::new(project_id);
            let project = store.require_project(&id)?;
            let pages = store.get_pages(&id)?;
            let planner = ReorganizationPlanner::new(config.classifier());
            print_json(&planner.plan(project.project_type, &pages))
        }
        Commands::Apply {
            project_id,
            suggestion,
        } => {
            let id = ProjectId::new(project_id);
            store.require_project(&id)?;
            let classification: Classification = read_json(&suggestion)?;
            let approved = classification.as_reorganization().ok_or_else(|| {
                FolioError::InvalidInput(
                    "only category suggestions can be applied; section suggestions are advisory"
                        .into(),
                )
            })?;
            let pages = store.get_pages(&id)?;
            let outcome = apply_reorganization_concurrently(
                &id,
                approved,
                &pages,
                Arc::new(store),
                config.max_concurrent_writes,
            )
            .await?;
            print_json(&outcome)?;
            outcome.ensure_complete()
        }
        Commands::Export { project_id } => {
            let id = ProjectId::new(project_id);
            let project = store.require_project(&id)?;
            let pages = store.get_pages(&id)?;
            let chapters = store.get_chapters(&id)?;
            let payload =
                BookAssembler::assemble_with_chapters(&project, &pages, &chapters, chrono::Utc::now());
            print_json(&payload)
        }
    }
}

fn import(
    store: &ProjectStore,
    id: ProjectId,
    pages_path: &Path,
    title: Option<String>,
    project_type: Option<String>,
) -> Result<()> {
    let pages: Vec<Page> = read_json(pages_path)?;
    let existing = store.get_project(&id)?;

    let project = ProjectInfo {
        title: title
            .or_else(|| existing.as_ref().map(|p| p.title.clone()))
            .unwrap_or_else(|| id.to_string()),
        description: existing.as_ref().and_then(|p| p.description.clone()),
        project_type: match project_type.as_deref() {
            Some(tag) => ProjectType::parse(Some(tag)),
            None => existing.map(|p| p.project_type).unwrap_or_default(),
        },
        id,
    };
    store.upsert_project(&project)?;
    let count = store.import_pages(&project.id, &pages)?;
    info!(project_id = %project.id, count, project_type = project.project_type.as_str(), "import complete");
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn import_accepts_type_flag() {
        let cli = Cli::parse_from([
            "folio", "--db", "x.db", "import", "book", "pages.json", "--type", "recipe",
        ]);
        assert_eq!(cli.db.as_deref(), Some(Path::new("x.db")));
        match cli.command {
            Commands::Import { project_id, project_type, title, .. } => {
                assert_eq!(project_id, "book");
                assert_eq!(project_type.as_deref(), Some("recipe"));
                assert!(title.is_none());
            }
            _ => panic!("expected import"),
        }
    }
}
