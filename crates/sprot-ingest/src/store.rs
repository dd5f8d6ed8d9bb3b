//! SQLite destination store and bulk insert writer
//!
//! Rows are bound positionally in [`COLUMNS`] order, so a destination table
//! must have exactly these seven columns in this order. [`ProteinStore::create_table`]
//! creates such a table.

use rusqlite::{params, Connection, Row, Statement};
use sprot_common::ProteinRecord;
use std::path::{Path, PathBuf};

use crate::error::{LoadError, Result};

/// Column order of every protein table
pub const COLUMNS: [&str; 7] = [
    "identifier",
    "accession",
    "is_reviewed",
    "is_fragment",
    "length",
    "taxon_id",
    "crc64",
];

/// Reject anything that is not a plain SQL identifier.
///
/// Table names are spliced into SQL text, so only `[A-Za-z_][A-Za-z0-9_]*`
/// is accepted.
pub fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        },
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(LoadError::statement_invalid(
            table,
            "table name must match [A-Za-z_][A-Za-z0-9_]*",
        ))
    }
}

fn insert_sql(table: &str) -> String {
    format!("INSERT INTO {} VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)", table)
}

fn create_table_sql(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            identifier TEXT NOT NULL,
            accession TEXT NOT NULL,
            is_reviewed INTEGER NOT NULL,
            is_fragment INTEGER NOT NULL,
            length INTEGER NOT NULL,
            taxon_id INTEGER NOT NULL,
            crc64 TEXT NOT NULL
        )
        "#,
        table
    )
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ProteinRecord> {
    Ok(ProteinRecord {
        identifier: row.get(0)?,
        accession: row.get(1)?,
        is_reviewed: row.get(2)?,
        is_fragment: row.get(3)?,
        length: row.get(4)?,
        taxon_id: row.get(5)?,
        crc64: row.get(6)?,
    })
}

/// Handle on a SQLite database holding protein tables
pub struct ProteinStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl ProteinStore {
    /// Open the database at `path`, creating the file if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| LoadError::StoreUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| LoadError::StoreUnavailable {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Create `table` with the canonical protein schema if it does not exist.
    ///
    /// There is no key: loading the same file twice stores every row twice.
    pub fn create_table(&self, table: &str) -> Result<()> {
        validate_table_name(table)?;
        self.conn
            .execute(&create_table_sql(table), [])
            .map_err(|e| LoadError::statement_invalid(table, e))?;
        Ok(())
    }

    /// Number of rows in `table`
    pub fn count(&self, table: &str) -> Result<u64> {
        validate_table_name(table)?;
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// All rows of `table` in insertion order
    pub fn records(&self, table: &str) -> Result<Vec<ProteinRecord>> {
        let mut records = Vec::new();
        self.for_each_record(table, None, |record| {
            records.push(record);
            Ok::<(), LoadError>(())
        })?;
        Ok(records)
    }

    /// Stream rows of `table` in insertion order, at most `limit` of them.
    ///
    /// Rows are handed to `visit` one at a time; nothing is buffered. Returns
    /// the number of rows visited.
    pub fn for_each_record<E, F>(
        &self,
        table: &str,
        limit: Option<usize>,
        mut visit: F,
    ) -> std::result::Result<u64, E>
    where
        E: From<LoadError>,
        F: FnMut(ProteinRecord) -> std::result::Result<(), E>,
    {
        validate_table_name(table)?;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY rowid LIMIT ?1",
            COLUMNS.join(", "),
            table
        );
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));

        let mut stmt = self.conn.prepare(&sql).map_err(LoadError::from)?;
        let mut rows = stmt.query([limit]).map_err(LoadError::from)?;

        let mut visited = 0;
        while let Some(row) = rows.next().map_err(LoadError::from)? {
            visit(row_to_record(row).map_err(LoadError::from)?)?;
            visited += 1;
        }
        Ok(visited)
    }

    /// Size of the database file on disk in bytes (0 when in memory)
    pub fn file_size(&self) -> u64 {
        self.path
            .as_ref()
            .and_then(|path| std::fs::metadata(path).ok())
            .map_or(0, |meta| meta.len())
    }
}

/// Prepared insert reused for every record of a load.
///
/// Borrow it from the load transaction; it must be dropped before the
/// transaction is committed.
pub struct BulkWriter<'conn> {
    statement: Statement<'conn>,
    written: u64,
}

impl<'conn> BulkWriter<'conn> {
    /// Prepare the insert statement for `table`.
    ///
    /// Fails with `StatementInvalid` if the table is missing or does not have
    /// exactly seven columns.
    pub fn prepare(conn: &'conn Connection, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        let statement = conn
            .prepare(&insert_sql(table))
            .map_err(|e| LoadError::statement_invalid(table, e))?;

        Ok(Self {
            statement,
            written: 0,
        })
    }

    /// Bind and execute the insert for one record
    pub fn insert(&mut self, record: &ProteinRecord) -> Result<()> {
        self.statement
            .execute(params![
                record.identifier,
                record.accession,
                record.is_reviewed,
                record.is_fragment,
                record.length,
                record.taxon_id,
                record.crc64,
            ])
            .map_err(|source| LoadError::BindOrExecute {
                record: self.written + 1,
                accession: record.accession.clone(),
                source,
            })?;

        self.written += 1;
        Ok(())
    }

    /// Records inserted through this writer
    pub fn written(&self) -> u64 {
        self.written
    }
}
