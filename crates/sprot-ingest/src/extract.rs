//! Field extraction rules, one per line kind
//!
//! Each rule reads a classified line and updates the in-flight record.
//! Rules never fail; see [`crate::tokens`] for how short or odd lines are
//! tolerated.

use sprot_common::ProteinRecord;

use crate::classify::LineKind;
use crate::tokens::{after_first, leading_int, nth_token, strip_last_char};

/// Apply the rule for `kind` to `record`.
///
/// `Terminator` and `Other` carry no fields and leave the record untouched.
pub fn apply(kind: LineKind, line: &str, record: &mut ProteinRecord) {
    match kind {
        LineKind::Id => extract_id(line, record),
        LineKind::Accession => extract_accession(line, record),
        LineKind::DescriptionFlags => extract_flags(line, record),
        LineKind::NonTerminal => record.is_fragment = true,
        LineKind::TaxonomyId => extract_taxon(line, record),
        LineKind::Sequence => extract_crc64(line, record),
        LineKind::Terminator | LineKind::Other => {},
    }
}

/// ID   001R_FRG3G              Reviewed;         256 AA.
fn extract_id(line: &str, record: &mut ProteinRecord) {
    if let Some(identifier) = nth_token(line, 1) {
        record.identifier = identifier.to_string();
    }
    if let Some(status) = nth_token(line, 2) {
        record.is_reviewed = status.contains("Reviewed");
    }
    if let Some(length) = nth_token(line, 3) {
        record.length = leading_int(length);
    }
}

/// AC   P12345; P67890;
///
/// Only the primary (first) accession is kept.
fn extract_accession(line: &str, record: &mut ProteinRecord) {
    if !record.accession.is_empty() {
        return;
    }
    if let Some(token) = nth_token(line, 1) {
        record.accession = strip_last_char(token).to_string();
    }
}

/// DE   Flags: Fragment;
fn extract_flags(line: &str, record: &mut ProteinRecord) {
    if line.contains("Fragment") {
        record.is_fragment = true;
    }
}

/// OX   NCBI_TaxID=9606;
fn extract_taxon(line: &str, record: &mut ProteinRecord) {
    if let Some(value) = after_first(line, '=') {
        record.taxon_id = leading_int(value);
    }
}

/// SQ   SEQUENCE   256 AA;  29735 MW;  B4840739BF7D4121 CRC64;
fn extract_crc64(line: &str, record: &mut ProteinRecord) {
    if let Some(crc64) = nth_token(line, 6) {
        record.crc64 = crc64.to_string();
    }
}
