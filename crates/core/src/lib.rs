//! align-core
//!
//! Core library for auditing the LOAD-segment alignment of native shared
//! libraries packaged inside Android apps (apk/aab) or provided as a single
//! `.so` file.
//!
//! Nothing here parses ELF structures directly: an external readelf or
//! llvm-readelf produces textual program-header and ELF-header dumps, and
//! this crate extracts alignment values from that text, classifies each
//! binary's architecture, evaluates 16 KiB compliance, and aggregates the
//! row-level report plus the 64-bit-only summary.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, CI wrappers, etc.).

pub mod arch;
pub mod compliance;
pub mod extract;
pub mod model;
pub mod numeric;
pub mod package;
pub mod report;
pub mod services;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
