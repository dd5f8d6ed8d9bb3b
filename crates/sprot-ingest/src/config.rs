//! Loader configuration
//!
//! Defaults can be supplied through environment variables (or a `.env` file
//! loaded by the binary); command-line arguments override them.

use std::path::PathBuf;

use crate::error::{LoadError, Result};
use crate::loader::{LoadOptions, DEFAULT_PROGRESS_INTERVAL};

// ============================================================================
// Loader Configuration Constants
// ============================================================================

/// Table loaded when none is specified
pub const DEFAULT_TABLE: &str = "protein";

/// Loader configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// SQLite database to load into
    pub database: Option<PathBuf>,

    /// Destination table
    pub table: String,

    /// Maximum number of entries to load per file (None for unlimited)
    pub parse_limit: Option<usize>,

    /// Records between progress updates
    pub progress_interval: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            database: None,
            table: DEFAULT_TABLE.to_string(),
            parse_limit: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl LoaderConfig {
    /// Load config from environment variables
    ///
    /// - `SPROT_DATABASE`: SQLite database path
    /// - `SPROT_TABLE`: destination table (default: `protein`)
    /// - `SPROT_PARSE_LIMIT`: maximum entries per file
    /// - `SPROT_PROGRESS_INTERVAL`: records between progress updates
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(database) = lookup("SPROT_DATABASE") {
            config.database = Some(PathBuf::from(database));
        }

        if let Some(table) = lookup("SPROT_TABLE") {
            config.table = table;
        }

        if let Some(limit) = lookup("SPROT_PARSE_LIMIT") {
            let limit = limit.trim().parse().map_err(|_| {
                LoadError::config(format!("SPROT_PARSE_LIMIT must be a non-negative integer, got '{}'", limit))
            })?;
            config.parse_limit = Some(limit);
        }

        if let Some(interval) = lookup("SPROT_PROGRESS_INTERVAL") {
            config.progress_interval = interval.trim().parse().map_err(|_| {
                LoadError::config(format!(
                    "SPROT_PROGRESS_INTERVAL must be a non-negative integer, got '{}'",
                    interval
                ))
            })?;
        }

        Ok(config)
    }

    /// Set parse limit
    pub fn with_parse_limit(mut self, limit: usize) -> Self {
        self.parse_limit = Some(limit);
        self
    }

    /// Set destination table
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Load options derived from this config
    pub fn load_options(&self) -> LoadOptions {
        let options = LoadOptions::new().with_progress_interval(self.progress_interval);
        match self.parse_limit {
            Some(limit) => options.with_limit(limit),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.table, "protein");
        assert_eq!(config.database, None);
        assert_eq!(config.parse_limit, None);
        assert_eq!(config.progress_interval, DEFAULT_PROGRESS_INTERVAL);
    }

    #[test]
    fn test_config_from_lookup() {
        let config = LoaderConfig::from_lookup(lookup(&[
            ("SPROT_DATABASE", "/tmp/proteins.sqlite"),
            ("SPROT_TABLE", "protein_new"),
            ("SPROT_PARSE_LIMIT", "500"),
            ("SPROT_PROGRESS_INTERVAL", "1000"),
        ]))
        .unwrap();

        assert_eq!(config.database, Some(PathBuf::from("/tmp/proteins.sqlite")));
        assert_eq!(config.table, "protein_new");
        assert_eq!(config.parse_limit, Some(500));
        assert_eq!(config.progress_interval, 1000);
    }

    #[test]
    fn test_invalid_parse_limit() {
        let err = LoaderConfig::from_lookup(lookup(&[("SPROT_PARSE_LIMIT", "lots")])).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn test_zero_parse_limit_is_kept() {
        let config = LoaderConfig::from_lookup(lookup(&[("SPROT_PARSE_LIMIT", "0")])).unwrap();
        assert_eq!(config.parse_limit, Some(0));
        assert_eq!(config.load_options().limit, Some(0));
    }

    #[test]
    fn test_load_options_from_config() {
        let options = LoaderConfig::default().with_parse_limit(10).load_options();
        assert_eq!(options.limit, Some(10));
        assert_eq!(options.progress_interval, DEFAULT_PROGRESS_INTERVAL);
        assert!(options.progress.is_none());

        let config = LoaderConfig::default().with_table("protein_old");
        assert_eq!(config.table, "protein_old");
    }
}
