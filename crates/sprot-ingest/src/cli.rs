//! Command-line definitions for `sprot-ingest`

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sprot-ingest - load UniProtKB flat files into SQLite
#[derive(Parser, Debug)]
#[command(name = "sprot-ingest")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load one or more flat files (.dat or .dat.gz) into a table
    Load {
        /// Flat files to load, in order (e.g., Swiss-Prot then TrEMBL)
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// SQLite database (default: $SPROT_DATABASE)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Destination table (default: $SPROT_TABLE or "protein")
        #[arg(short, long)]
        table: Option<String>,

        /// Create the table with the protein schema if it does not exist
        #[arg(long)]
        create_table: bool,

        /// Stop after this many entries per file
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print load reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the number of rows in a table
    Count {
        /// SQLite database (default: $SPROT_DATABASE)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Table to count (default: $SPROT_TABLE or "protein")
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Print rows of a table as JSON lines
    Dump {
        /// SQLite database (default: $SPROT_DATABASE)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Table to dump (default: $SPROT_TABLE or "protein")
        #[arg(short, long)]
        table: Option<String>,

        /// Maximum number of rows to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
}
