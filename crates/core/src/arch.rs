//! Architecture classification for audited binaries.
//!
//! Packaging conventions place native libraries in per-ABI directories, so a
//! path hint is checked first; only when it misses is the textual ELF-header
//! dump consulted. A binary that cannot be confirmed 64-bit classifies as
//! not-64-bit and silently stays out of the 64-bit summary.

use std::path::Path;

use crate::model::BinaryArchInfo;

/// Directory segments that mark a 64-bit ABI in package layouts.
const ABI64_DIR_MARKERS: [&str; 2] = ["/arm64-v8a/", "/x86_64/"];

/// Machine-string fragments that denote a 64-bit architecture.
const MACHINE64_FRAGMENTS: [&str; 4] =
    ["aarch64", "x86-64", "amd x86-64", "advanced micro devices x86-64"];

/// Classify one binary from its path and ELF-header dump.
///
/// The path hint wins outright when present; the dump is only interpreted
/// otherwise.
pub fn classify(path: &Path, header_dump: &str) -> BinaryArchInfo {
    let is_64bit = is_64bit_path_hint(path) || is_64bit_header(header_dump);
    BinaryArchInfo { path: path.to_string_lossy().into_owned(), is_64bit }
}

/// True when the path contains a known 64-bit ABI directory segment.
pub fn is_64bit_path_hint(path: &Path) -> bool {
    let text = path.to_string_lossy();
    ABI64_DIR_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Classify from the `Class:` and `Machine:` lines of an ELF-header dump.
///
/// `Class` is authoritative: a class without the 64-bit marker is not 64-bit
/// no matter what the machine string says. A missing machine string falls
/// back to the class text; otherwise the machine string is searched
/// case-insensitively for known 64-bit fragments.
pub fn is_64bit_header(dump: &str) -> bool {
    let mut class: Option<String> = None;
    let mut machine: Option<String> = None;
    for line in dump.lines() {
        if line.contains("Class:") {
            class = field_value(line);
        }
        if line.contains("Machine:") {
            machine = field_value(line);
        }
    }

    if let Some(class) = &class {
        if !class.contains("ELF64") {
            return false;
        }
    }
    let Some(machine) = machine else {
        return class.is_some_and(|c| c.contains("ELF64"));
    };
    let machine = machine.to_lowercase();
    MACHINE64_FRAGMENTS.iter().any(|fragment| machine.contains(fragment))
}

/// Value after the first `:` on a labeled line; empty values count as absent.
fn field_value(line: &str) -> Option<String> {
    line.split_once(':').map(|(_, value)| value.trim().to_string()).filter(|v| !v.is_empty())
}
