//! Build automation tasks for sprot
//!
//! Currently generates the `sprot-ingest` command reference from its clap
//! definitions.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for sprot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<sprot_ingest::Cli>();

    let content = format!(
        r#"# sprot-ingest CLI Reference

This documentation is generated from the CLI source code. Last updated: {}.

## Overview

`sprot-ingest` loads UniProtKB flat files (Swiss-Prot and TrEMBL, plain or
gzip-compressed) into a SQLite table with one row per entry:

| column        | type    |
|---------------|---------|
| identifier    | TEXT    |
| accession     | TEXT    |
| is_reviewed   | INTEGER |
| is_fragment   | INTEGER |
| length        | INTEGER |
| taxon_id      | INTEGER |
| crc64         | TEXT    |

Each file is loaded in a single transaction.

## Quick Start

```bash
# Load Swiss-Prot then TrEMBL into a fresh table
sprot-ingest load uniprot_sprot.dat.gz uniprot_trembl.dat.gz \
  --database proteins.sqlite --create-table

# How many rows?
sprot-ingest count --database proteins.sqlite

# First rows as JSON lines
sprot-ingest dump --database proteins.sqlite --limit 5
```

## Commands

{}

## Environment Variables

- `SPROT_DATABASE` - Default SQLite database path
- `SPROT_TABLE` - Default table name (default: `protein`)
- `SPROT_PARSE_LIMIT` - Stop after this many entries per file
- `SPROT_PROGRESS_INTERVAL` - Entries between progress updates (default: `100000`, `0` disables)
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR`, `LOG_FILE_PREFIX`, `LOG_FILTER` - Logging

A `.env` file in the working directory is read at startup.

---

*This documentation is generated from the CLI source code. To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
