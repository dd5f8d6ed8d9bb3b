//! Flat-file to SQLite bulk loader
//!
//! Streams a UniProtKB flat file line by line, builds one [`ProteinRecord`]
//! per entry and inserts it through a single prepared statement. The whole
//! file is loaded inside one transaction: it is committed after the last line
//! and rolled back if the load stops early for any reason.
//!
//! [`ProteinRecord`]: sprot_common::ProteinRecord

use flate2::read::MultiGzDecoder;
use indicatif::ProgressBar;
use rusqlite::Connection;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, info_span};

use crate::accumulator::EntryAccumulator;
use crate::classify::{classify, LineKind};
use crate::error::{LoadError, Result};
use crate::store::{BulkWriter, ProteinStore};

/// Default number of records between progress updates
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

const READ_BUFFER_SIZE: usize = 1 << 20;

/// Tuning knobs for a load
#[derive(Clone)]
pub struct LoadOptions {
    /// Stop after this many records (None for the whole file)
    pub limit: Option<usize>,
    /// Records between progress updates (0 disables them)
    pub progress_interval: u64,
    /// Bar advanced with the running record count
    pub progress: Option<ProgressBar>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            limit: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            progress: None,
        }
    }
}

impl std::fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadOptions")
            .field("limit", &self.limit)
            .field("progress_interval", &self.progress_interval)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    fn limit_reached(&self, records: u64) -> bool {
        self.limit.is_some_and(|limit| records >= limit as u64)
    }
}

/// Outcome of a completed load
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Source file, when loaded from a path
    pub source: Option<PathBuf>,
    /// Destination table
    pub table: String,
    /// Records inserted
    pub records: u64,
    /// Lines read
    pub lines: u64,
    /// Lines that matched no rule
    pub ignored_lines: u64,
    /// Wall-clock duration in milliseconds
    pub elapsed_ms: u64,
}

/// Load `source` into `table` of the SQLite database at `store`.
///
/// Returns the number of records inserted. The table must already exist
/// with the seven protein columns (see [`crate::store::COLUMNS`]).
///
/// # Example
///
/// ```no_run
/// let count = sprot_ingest::load("uniprot_sprot.dat.gz", "proteins.sqlite", "protein")?;
/// println!("{count} proteins");
/// # Ok::<(), sprot_ingest::LoadError>(())
/// ```
pub fn load(
    source: impl AsRef<Path>,
    store: impl AsRef<Path>,
    table: &str,
) -> Result<u64> {
    let report = load_with_options(source, store, table, &LoadOptions::default())?;
    Ok(report.records)
}

/// [`load`] with options, returning the full report.
///
/// The source is opened before the store, so an unreadable source leaves the
/// destination untouched.
pub fn load_with_options(
    source: impl AsRef<Path>,
    store: impl AsRef<Path>,
    table: &str,
    options: &LoadOptions,
) -> Result<LoadReport> {
    let source = source.as_ref();
    let store_path = store.as_ref();
    let _span = info_span!(
        "load",
        source = %source.display(),
        store = %store_path.display(),
        table
    )
    .entered();

    let reader = open_source(source)?;
    let mut store = ProteinStore::open(store_path)?;

    let mut report = load_reader(store.connection_mut(), reader, table, options)?;
    report.source = Some(source.to_path_buf());
    Ok(report)
}

/// Open a flat file for buffered line reading.
///
/// Files ending in `.gz` are decompressed on the fly.
pub fn open_source(path: &Path) -> Result<Box<dyn BufRead>> {
    let unavailable = |source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unavailable)?;
    let metadata = file.metadata().map_err(unavailable)?;
    if !metadata.is_file() {
        return Err(unavailable(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        debug!(path = %path.display(), "Reading gzip-compressed source");
        Ok(Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiGzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
    }
}

/// Run the load pipeline over `reader` against an open connection.
///
/// Everything happens in one transaction on `conn`. Any error returns before
/// the commit and the transaction is rolled back when dropped.
pub fn load_reader<R: BufRead>(
    conn: &mut Connection,
    mut reader: R,
    table: &str,
    options: &LoadOptions,
) -> Result<LoadReport> {
    let started = Instant::now();
    let mut report = LoadReport {
        table: table.to_string(),
        ..Default::default()
    };

    let tx = conn.transaction().map_err(LoadError::Transaction)?;
    {
        let mut writer = BulkWriter::prepare(&tx, table)?;
        let mut accumulator = EntryAccumulator::new();
        let mut buffer = Vec::new();

        info!(table, "Loading UniProtKB entries");

        loop {
            if options.limit_reached(report.records) {
                info!(limit = ?options.limit, "Record limit reached, stopping early");
                break;
            }

            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|source| LoadError::Read {
                    line: report.lines + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }
            report.lines += 1;

            // Stray non-UTF-8 bytes are replaced, not fatal
            let decoded = String::from_utf8_lossy(&buffer);
            let line = decoded.trim_end();
            let kind = classify(line);
            if kind == LineKind::Other {
                report.ignored_lines += 1;
            }

            let Some(record) = accumulator.feed_classified(kind, line) else {
                continue;
            };

            writer.insert(&record)?;
            report.records = writer.written();

            if options.progress_interval > 0 && report.records % options.progress_interval == 0 {
                debug!(records = report.records, lines = report.lines, "Load progress");
                if let Some(ref pb) = options.progress {
                    pb.set_position(report.records);
                }
            }
        }
    }
    tx.commit().map_err(LoadError::Transaction)?;

    if let Some(ref pb) = options.progress {
        pb.set_position(report.records);
    }

    report.elapsed_ms = started.elapsed().as_millis() as u64;
    debug!(ignored_lines = report.ignored_lines, "Lines without a rule");
    info!(
        records = report.records,
        lines = report.lines,
        elapsed_ms = report.elapsed_ms,
        "Load committed"
    );

    Ok(report)
}
