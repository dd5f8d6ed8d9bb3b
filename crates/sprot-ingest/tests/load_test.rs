//! End-to-end tests for loading UniProtKB flat files into SQLite

use flate2::write::GzEncoder;
use flate2::Compression;
use sprot_ingest::{load, load_with_options, LoadError, LoadOptions, ProteinRecord, ProteinStore};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("uniprot")
        .join(name)
}

/// Fresh database in a temp dir with an empty `protein` table
fn prepared_store(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("proteins.sqlite");
    ProteinStore::open(&path)
        .unwrap()
        .create_table("protein")
        .unwrap();
    path
}

fn rows(database: &Path) -> Vec<ProteinRecord> {
    ProteinStore::open(database).unwrap().records("protein").unwrap()
}

fn find<'a>(records: &'a [ProteinRecord], accession: &str) -> &'a ProteinRecord {
    records
        .iter()
        .find(|r| r.accession == accession)
        .unwrap_or_else(|| panic!("no record for {}", accession))
}

// ============================================================================
// ROUND TRIP
// ============================================================================

#[test]
fn test_two_entry_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let database = prepared_store(&dir);

    let count = load(fixture_path("two_entries.dat"), &database, "protein").unwrap();
    assert_eq!(count, 2);

    let records = rows(&database);
    assert_eq!(
        records,
        vec![
            ProteinRecord {
                identifier: "001R_FRG3G".to_string(),
                accession: "Q6GZX4".to_string(),
                is_reviewed: true,
                is_fragment: false,
                length: 256,
                taxon_id: 654924,
                crc64: "B4840739BF7D4121".to_string(),
            },
            ProteinRecord {
                identifier: "002L_FRG3G".to_string(),
                accession: "Q6GZX3".to_string(),
                is_reviewed: true,
                is_fragment: false,
                length: 320,
                taxon_id: 654924,
                crc64: "9B4B5F0A1B6A8D4C".to_string(),
            },
        ]
    );
}

#[test]
fn test_count_matches_terminator_lines() {
    let dir = TempDir::new().unwrap();
    let database = prepared_store(&dir);
    let source = dir.path().join("many.dat");

    let entry = "ID   X_HUMAN  Unreviewed;  5 AA.\nAC   A00001;\n//\n";
    std::fs::write(&source, entry.repeat(250)).unwrap();

    assert_eq!(load(&source, &database, "protein").unwrap(), 250);
    assert_eq!(ProteinStore::open(&database).unwrap().count("protein").unwrap(), 250);
}

#[test]
fn test_empty_file_loads_nothing() {
    let dir = TempDir::new().unwrap();
    let database = prepared_store(&dir);
    let source = dir.path().join("empty.dat");
    std::fs::write(&source, "").unwrap();

    assert_eq!(load(&source, &database, "protein").unwrap(), 0);
}

// ============================================================================
// FIELD RULES
// ============================================================================

#[test]
fn test_edge_case_entries() {
    let dir = TempDir::new().unwrap();
    let database = prepared_store(&dir);

    assert_eq!(load(fixture_path("edge_cases.dat"), &database, "protein").unwrap(), 3);
    let records = rows(&database);

    // Secondary accessions, on the same line or the next, are discarded
    let trembl = find(&records, "A0A023GPI8");
    assert!(!trembl.is_reviewed);
    assert!(trembl.is_fragment);
    assert_eq!(trembl.taxon_id, 5476);
    assert!(records.iter().all(|r| r.accession != "A0A0C7XYZ1"));
    assert!(records.iter().all(|r| r.accession != "A0A0C7XYZ2"));

    // NON_TER alone marks a fragment even when the flags say otherwise
    let truncated = find(&records, "P00003");
    assert!(truncated.is_reviewed);
    assert!(truncated.is_fragment);
    assert_eq!(truncated.length, 42);

    // Missing OX and a short SQ line leave defaults
    let bare = find(&records, "Q99999");
    assert_eq!(bare.identifier, "NOTAXON_HUMAN");
    assert_eq!(bare.taxon_id, 0);
    assert_eq!(bare.crc64, "");
    assert!(!bare.is_fragment);
}

#[test]
fn test_incomplete_entries_are_still_inserted() {
    let dir = TempDir::new().unwrap();
    let database = prepared_store(&dir);
    let source = dir.path().join("incomplete.dat");
    std::fs::write(&source, "AC   P12345; P99999;\n//\n//\n").unwrap();

    assert_eq!(load(&source, &database, "protein").unwrap(), 2);
    let records = rows(&database);
    assert_eq!(records[0].accession, "P12345");
    assert_eq!(records[0].identifier, "");
    assert!(records[1].is_empty());
}

// ============================================================================
// APPEND-ONLY SEMANTICS
// ============================================================================

#[test]
fn test_loading_twice_duplicates_rows() {
    let dir = TempDir::new().unwrap();
    let database = prepared_store(&dir);
    let source = fixture_path("two_entries.dat");

    assert_eq!(load(&source, &database, "protein").unwrap(), 2);
    assert_eq!(load(&source, &database, "protein").unwrap(), 2);

    let records = rows(&database);
    assert_eq!(records.len(), 4);
    assert_eq!(records[0], records[2]);
    assert_eq!(records[1], records[3]);
}

// ============================================================================
// COMPRESSED INPUT AND OPTIONS
// ============================================================================

#[test]
fn test_gzip_source_matches_plain_source() {
    let dir = TempDir::new().unwrap();
    let plain_db = prepared_store(&dir);
    let gz_dir = TempDir::new().unwrap();
    let gz_db = prepared_store(&gz_dir);

    let plain = std::fs::read(fixture_path("two_entries.dat")).unwrap();
    let gz_path = dir.path().join("two_entries.dat.gz");
    let mut encoder = GzEncoder::new(std::fs::File::create(&gz_path).unwrap(), Compression::default());
    encoder.write_all(&plain).unwrap();
    encoder.finish().unwrap();

    load(fixture_path("two_entries.dat"), &plain_db, "protein").unwrap();
    assert_eq!(load(&gz_path, &gz_db, "protein").unwrap(), 2);

    assert_eq!(rows(&plain_db), rows(&gz_db));
}

#[test]
fn test_limit_and_report() {
    let dir = TempDir::new().unwrap();
    let database = prepared_store(&dir);
    let source = fixture_path("edge_cases.dat");

    let report = load_with_options(&source, &database, "protein", &LoadOptions::new().with_limit(2))
        .unwrap();

    assert_eq!(report.records, 2);
    assert_eq!(report.source.as_deref(), Some(source.as_path()));
    assert_eq!(report.table, "protein");
    assert!(report.ignored_lines > 0);
    assert_eq!(rows(&database).len(), 2);
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_missing_source_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("never-created.sqlite");

    let err = load(dir.path().join("missing.dat"), &database, "protein").unwrap_err();

    assert!(matches!(err, LoadError::SourceUnavailable { .. }));
    assert!(!database.exists());
}

#[test]
fn test_unopenable_store() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("no").join("such").join("dir").join("proteins.sqlite");

    let err = load(fixture_path("two_entries.dat"), &database, "protein").unwrap_err();
    assert!(matches!(err, LoadError::StoreUnavailable { .. }));
}

#[test]
fn test_missing_table_is_statement_invalid() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("proteins.sqlite");

    let err = load(fixture_path("two_entries.dat"), &database, "protein").unwrap_err();
    assert!(matches!(err, LoadError::StatementInvalid { .. }));
}

#[test]
fn test_schema_mismatch_is_statement_invalid() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("proteins.sqlite");
    ProteinStore::open(&database)
        .unwrap()
        .connection()
        .execute(
            "CREATE TABLE protein (accession TEXT, identifier TEXT, is_reviewed INTEGER, \
             crc64 TEXT, length INTEGER, is_fragment INTEGER, taxon_id INTEGER, extra TEXT)",
            [],
        )
        .unwrap();

    let err = load(fixture_path("two_entries.dat"), &database, "protein").unwrap_err();
    assert!(matches!(err, LoadError::StatementInvalid { .. }));
}

#[test]
fn test_invalid_table_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let database = prepared_store(&dir);

    let err = load(fixture_path("two_entries.dat"), &database, "protein; DROP TABLE protein").unwrap_err();
    assert!(matches!(err, LoadError::StatementInvalid { .. }));
    assert_eq!(ProteinStore::open(&database).unwrap().count("protein").unwrap(), 0);
}

#[test]
fn test_insert_failure_rolls_back_whole_file() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("proteins.sqlite");
    ProteinStore::open(&database)
        .unwrap()
        .connection()
        .execute(
            "CREATE TABLE protein (identifier TEXT, accession TEXT, is_reviewed INTEGER, \
             is_fragment INTEGER, length INTEGER, taxon_id INTEGER CHECK (taxon_id > 0), crc64 TEXT)",
            [],
        )
        .unwrap();

    // Two good entries, then Q99999 without an OX line violates the CHECK
    let err = load(fixture_path("edge_cases.dat"), &database, "protein").unwrap_err();

    match err {
        LoadError::BindOrExecute { record, accession, .. } => {
            assert_eq!(record, 3);
            assert_eq!(accession, "Q99999");
        },
        other => panic!("expected BindOrExecute, got {:?}", other),
    }
    assert_eq!(ProteinStore::open(&database).unwrap().count("protein").unwrap(), 0);
}
