//! Common types used across sprot

use serde::{Deserialize, Serialize};

/// One UniProtKB entry reduced to the columns of the protein table.
///
/// Every field starts out empty, zero or false. The loader fills what it
/// finds and inserts the record as-is, so a row may be partially populated
/// when the source entry lacked some lines.
///
/// # Examples
///
/// ```rust
/// use sprot_common::ProteinRecord;
///
/// let record = ProteinRecord {
///     identifier: "INS_HUMAN".to_string(),
///     accession: "P01308".to_string(),
///     is_reviewed: true,
///     length: 110,
///     taxon_id: 9606,
///     crc64: "C2C3B23B85E520E5".to_string(),
///     ..Default::default()
/// };
/// assert!(!record.is_fragment);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinRecord {
    /// Entry name from the ID line (e.g., "INS_HUMAN")
    pub identifier: String,

    /// Primary accession from the first AC line (e.g., "P01308")
    pub accession: String,

    /// Swiss-Prot (reviewed) rather than TrEMBL (unreviewed)
    pub is_reviewed: bool,

    /// Sequence is incomplete (DE Flags: Fragment or FT NON_TER)
    pub is_fragment: bool,

    /// Sequence length in amino acids
    pub length: i64,

    /// NCBI taxonomy identifier from the OX line
    pub taxon_id: i64,

    /// CRC64 checksum of the sequence, 16 hex digits
    pub crc64: String,
}

impl ProteinRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field has been populated yet
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
