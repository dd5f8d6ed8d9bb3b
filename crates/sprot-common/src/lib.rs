//! sprot Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types and utilities for the sprot workspace.
//!
//! # Overview
//!
//! - **Types**: the [`ProteinRecord`] row loaded from UniProtKB flat files
//! - **Logging**: centralized `tracing` subscriber setup
//!
//! # Example
//!
//! ```no_run
//! use sprot_common::logging::{init_logging, LogConfig};
//! use sprot_common::ProteinRecord;
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!
//!     let record = ProteinRecord::default();
//!     tracing::info!(accession = %record.accession, "empty record");
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod types;

// Re-export commonly used types
pub use types::ProteinRecord;
