//! Audit orchestration: the dump-acquisition seam and the per-binary driver.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::arch;
use crate::extract;
use crate::model::BinaryArchInfo;
use crate::report::ReportAggregator;

/// Error type for header-dump acquisition.
///
/// A non-zero exit from the external tool is *not* an error here: whatever
/// text it printed is still handed to the extractor. Only failing to run the
/// tool at all, or a missing binary, surfaces as an error.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Binary not found at {0}")]
    MissingBinary(PathBuf),

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

/// Trait implemented by header-dump sources (readelf, llvm-readelf, fakes).
///
/// Both dumps are best-effort text: implementations must return whatever the
/// tool printed, including partial output on warnings or an empty string.
pub trait HeaderDumper: Send + Sync {
    /// Wide, long-form program-header listing for `binary`.
    fn program_headers(&self, binary: &Path) -> Result<String, DumpError>;

    /// Wide ELF-header summary for `binary`.
    fn elf_header(&self, binary: &Path) -> Result<String, DumpError>;
}

/// Drives the audit of individual binaries against a dump source and feeds
/// the shared aggregator.
pub struct Auditor<'a> {
    pub dumper: &'a dyn HeaderDumper,
}

impl Auditor<'_> {
    /// Audit a single binary: extract its LOAD alignments, classify its
    /// architecture, and record both into `agg`.
    ///
    /// The ELF-header dump is only requested when the path hint misses, so a
    /// binary in a 64-bit ABI directory costs one tool invocation, not two.
    pub fn audit_binary(&self, binary: &Path, agg: &mut ReportAggregator) -> Result<(), DumpError> {
        if !binary.is_file() {
            return Err(DumpError::MissingBinary(binary.to_path_buf()));
        }

        let phdrs = self.dumper.program_headers(binary)?;
        let segments = extract::load_segments(&phdrs);
        log::info!("{}: {} LOAD segment(s)", binary.display(), segments.len());

        let arch = if arch::is_64bit_path_hint(binary) {
            BinaryArchInfo { path: binary.to_string_lossy().into_owned(), is_64bit: true }
        } else {
            let header = self.dumper.elf_header(binary)?;
            arch::classify(binary, &header)
        };

        agg.record(arch, &segments);
        Ok(())
    }
}
