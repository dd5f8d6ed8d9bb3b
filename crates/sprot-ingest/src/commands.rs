//! Command implementations for the `sprot-ingest` binary

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cli::Command;
use crate::config::LoaderConfig;
use crate::loader::{load_with_options, LoadReport};
use crate::progress::{create_load_spinner, format_bytes};
use crate::store::ProteinStore;

/// Run one parsed command
pub fn run(command: Command, config: &LoaderConfig) -> Result<()> {
    match command {
        Command::Load {
            sources,
            database,
            table,
            create_table,
            limit,
            json,
        } => {
            let database = resolve_database(database, config)?;
            let table = table.unwrap_or_else(|| config.table.clone());
            let config = match limit {
                Some(limit) => config.clone().with_parse_limit(limit),
                None => config.clone(),
            };
            let reports = load_files(&sources, &database, &table, create_table, &config)?;
            if json {
                let stdout = std::io::stdout();
                serde_json::to_writer_pretty(stdout.lock(), &reports)?;
                writeln!(stdout.lock())?;
            }
            Ok(())
        },
        Command::Count { database, table } => {
            let database = resolve_database(database, config)?;
            let table = table.unwrap_or_else(|| config.table.clone());
            let store = open_existing(&database)?;
            println!("{}", store.count(&table)?);
            Ok(())
        },
        Command::Dump {
            database,
            table,
            limit,
        } => {
            let database = resolve_database(database, config)?;
            let table = table.unwrap_or_else(|| config.table.clone());
            let store = open_existing(&database)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let rows = store.for_each_record(&table, limit, |record| -> Result<()> {
                serde_json::to_writer(&mut out, &record)?;
                writeln!(out)?;
                Ok(())
            })?;
            debug!(table = %table, rows, "Dump finished");
            Ok(())
        },
    }
}

/// Load each source in turn into `table`, one transaction per file
pub fn load_files(
    sources: &[PathBuf],
    database: &Path,
    table: &str,
    create_table: bool,
    config: &LoaderConfig,
) -> Result<Vec<LoadReport>> {
    // Check every source up front so a typo does not leave a half-loaded database
    for source in sources {
        if !source.is_file() {
            bail!("Source file not found: {}", source.display());
        }
    }

    if create_table {
        ProteinStore::open(database)?.create_table(table)?;
        info!(table, database = %database.display(), "Table ready");
    }

    let mut reports = Vec::with_capacity(sources.len());
    for source in sources {
        let name = source
            .file_name()
            .map_or_else(|| source.display().to_string(), |n| n.to_string_lossy().into_owned());
        let spinner = create_load_spinner(&name);
        let options = config.load_options().with_progress(spinner.clone());

        let report = load_with_options(source, database, table, &options).map_err(|err| {
            spinner.finish_and_clear();
            let outcome = if err.is_setup_failure() {
                "nothing was written"
            } else {
                "the transaction was rolled back"
            };
            anyhow::Error::new(err).context(format!("Failed to load {} ({})", source.display(), outcome))
        })?;
        spinner.finish_and_clear();

        info!(source = %name, records = report.records, "{}: {} proteins", name, report.records);
        reports.push(report);
    }

    let size = ProteinStore::open(database)?.file_size();
    info!(database = %database.display(), "Disk space used: {}", format_bytes(size));

    Ok(reports)
}

fn resolve_database(database: Option<PathBuf>, config: &LoaderConfig) -> Result<PathBuf> {
    database
        .or_else(|| config.database.clone())
        .context("No database given: pass --database or set SPROT_DATABASE")
}

fn open_existing(database: &Path) -> Result<ProteinStore> {
    if !database.is_file() {
        bail!("Database not found: {}", database.display());
    }
    Ok(ProteinStore::open(database)?)
}
