//! Error types for the flat-file loader
//!
//! Every variant is fatal for the load that raised it. Malformed lines are not
//! errors: the extractors tolerate them and leave fields at their defaults.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, LoadError>;

/// Failures surfaced by [`crate::load`] and the store helpers
#[derive(Error, Debug)]
pub enum LoadError {
    /// Source file is missing, unreadable or not a regular file
    #[error("Source unavailable: '{path}': {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination store could not be opened or created
    #[error("Store unavailable: '{path}': {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The insert statement could not be prepared against the table
    #[error("Cannot prepare insert into '{table}': {reason}")]
    StatementInvalid { table: String, reason: String },

    /// Binding or executing the insert for one record failed
    #[error("Failed to insert record #{record} (accession '{accession}'): {source}")]
    BindOrExecute {
        record: u64,
        accession: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Reading the source failed part-way through
    #[error("Failed to read line {line} of source: {source}")]
    Read {
        line: u64,
        #[source]
        source: std::io::Error,
    },

    /// Opening or committing the load transaction failed
    #[error("Transaction error: {0}")]
    Transaction(#[source] rusqlite::Error),

    /// A read-side query against the store failed
    #[error("Query error: {0}")]
    Query(#[from] rusqlite::Error),

    /// Loader configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LoadError {
    /// Create a statement error
    pub fn statement_invalid(table: impl Into<String>, reason: impl ToString) -> Self {
        Self::StatementInvalid {
            table: table.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for failures raised before any row was written
    pub fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. }
                | Self::StoreUnavailable { .. }
                | Self::StatementInvalid { .. }
                | Self::Config(_)
        )
    }
}
