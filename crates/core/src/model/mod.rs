//! Core data model for segment records, verdicts, and report rows.

use serde::{Deserialize, Serialize};

/// One loadable-segment record recovered from a program-header dump.
///
/// The extractor produces these without knowing which binary the dump came
/// from; the aggregator attaches the path when building report rows. An
/// absent token is an explicit "unknown", never a fabricated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRecord {
    /// Trimmed raw text of the `LOAD` line the record was anchored on.
    pub line_text: String,
    /// Alignment token exactly as found in the dump, if any strategy matched.
    pub align_token: Option<String>,
    /// Normalized alignment value; `None` when the token was absent or malformed.
    pub align_value: Option<u64>,
}

/// Compliance verdict for a single alignment value.
///
/// Serialized with the row-level label set used in the CSV report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceVerdict {
    #[serde(rename = "16kb")]
    Compliant16k,
    #[serde(rename = "not-16kb")]
    NotCompliant,
    #[serde(rename = "invalid")]
    InvalidAlignment,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Architecture info for one binary, computed once and cached by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryArchInfo {
    pub path: String,
    pub is_64bit: bool,
}

/// One persisted report row; serde names match the CSV column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "LineText")]
    pub line_text: String,
    /// Raw token as found in the dump; empty when absent.
    #[serde(rename = "Align")]
    pub align: String,
    /// Normalized alignment; serialized as an empty field when absent.
    #[serde(rename = "AlignInt")]
    pub align_int: Option<u64>,
    #[serde(rename = "Compliant")]
    pub compliant: ComplianceVerdict,
}

/// Per-binary summary entry, derived from the last LOAD record of that binary
/// and emitted only for confirmed 64-bit binaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub path: String,
    pub align: Option<u64>,
    pub verdict: ComplianceVerdict,
}
