//! sprot Ingest Library
//!
//! Bulk loader for UniProtKB flat files (Swiss-Prot / TrEMBL `.dat`).
//!
//! Each entry of the file becomes one row of a SQLite table with seven
//! columns: identifier, accession, is_reviewed, is_fragment, length,
//! taxon_id and crc64. A load is a single transaction: either the whole file
//! is committed or nothing is.
//!
//! # Pipeline
//!
//! - [`classify`]: tags each line by its prefix
//! - [`extract`]: per-tag field rules, lenient via [`tokens`]
//! - [`accumulator`]: builds one record per `//`-terminated entry
//! - [`store`]: prepared bulk insert and table helpers
//! - [`loader`]: drives the above over a file or reader
//!
//! # Example
//!
//! ```no_run
//! use sprot_ingest::{load, ProteinStore};
//!
//! fn main() -> anyhow::Result<()> {
//!     ProteinStore::open("proteins.sqlite")?.create_table("protein")?;
//!     let count = load("uniprot_sprot.dat.gz", "proteins.sqlite", "protein")?;
//!     tracing::info!(count, "Swiss-Prot loaded");
//!     Ok(())
//! }
//! ```

pub mod accumulator;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod loader;
pub mod progress;
pub mod store;
pub mod tokens;

// Re-export commonly used types
pub use accumulator::EntryAccumulator;
pub use classify::{classify, LineKind};
pub use cli::Cli;
pub use config::LoaderConfig;
pub use error::{LoadError, Result};
pub use loader::{load, load_reader, load_with_options, LoadOptions, LoadReport};
pub use sprot_common::ProteinRecord;
pub use store::{BulkWriter, ProteinStore, COLUMNS};
