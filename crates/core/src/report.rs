//! Row-level report aggregation, CSV persistence, and the 64-bit summary.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::compliance;
use crate::model::{BinaryArchInfo, ReportRow, SegmentRecord, SummaryEntry};

/// CSV column order; must stay stable for downstream consumers.
const CSV_HEADER: [&str; 5] = ["Filename", "LineText", "Align", "AlignInt", "Compliant"];

/// Error type for report persistence.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Collects per-binary extraction results and produces the row-level report
/// plus the filtered 64-bit summary.
///
/// Per-binary state lives in ordered maps keyed by path: reinsertion
/// overwrites (last record wins, in dump order) and iteration is already
/// sorted for the summary.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    rows: Vec<ReportRow>,
    last_align: BTreeMap<String, Option<u64>>,
    arch64: BTreeMap<String, bool>,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one audited binary: its architecture info and the segments
    /// extracted from its program-header dump, in dump order.
    ///
    /// A binary with zero segments contributes no row and no summary entry;
    /// absence of segments is absence of data, not an error.
    pub fn record(&mut self, arch: BinaryArchInfo, segments: &[SegmentRecord]) {
        self.arch64.insert(arch.path.clone(), arch.is_64bit);
        for segment in segments {
            self.rows.push(ReportRow {
                filename: arch.path.clone(),
                line_text: segment.line_text.clone(),
                align: segment.align_token.clone().unwrap_or_default(),
                align_int: segment.align_value,
                compliant: compliance::evaluate(segment.align_value),
            });
        }
        if let Some(last) = segments.last() {
            self.last_align.insert(arch.path, last.align_value);
        }
    }

    /// All rows in encounter order.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// One entry per confirmed-64-bit binary, sorted by path, with the
    /// verdict recomputed from the binary's last LOAD alignment.
    pub fn summary(&self) -> Vec<SummaryEntry> {
        self.last_align
            .iter()
            .filter(|(path, _)| self.arch64.get(*path).copied().unwrap_or(false))
            .map(|(path, align)| SummaryEntry {
                path: path.clone(),
                align: *align,
                verdict: compliance::evaluate(*align),
            })
            .collect()
    }

    /// Write the row-level CSV report.
    ///
    /// The header row is always emitted, even when there are no rows.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the row-level CSV report to a file.
    pub fn write_csv_file(&self, path: &Path) -> Result<(), ReportError> {
        let file = File::create(path)?;
        self.write_csv(file)
    }
}
