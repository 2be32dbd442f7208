//! Compliance evaluation against the 16 KiB page boundary, plus the pure
//! summary-status formatting consumed by frontends.

use crate::model::ComplianceVerdict;
use crate::numeric::is_power_of_two;

/// Alignment at or above this boundary satisfies the 16 KiB requirement.
pub const COMPLIANT_ALIGNMENT: u64 = 16384;

/// Smallest alignment considered meaningful for a loadable segment.
pub const MINIMUM_PAGE_ALIGNMENT: u64 = 4096;

/// Map a normalized alignment to its verdict.
///
/// Pure and total: an absent value is `Unknown`, a non-power-of-two or a
/// power of two below the minimum page size is `InvalidAlignment`.
pub fn evaluate(align: Option<u64>) -> ComplianceVerdict {
    let Some(n) = align else {
        return ComplianceVerdict::Unknown;
    };
    if !is_power_of_two(n) {
        return ComplianceVerdict::InvalidAlignment;
    }
    if n >= COMPLIANT_ALIGNMENT {
        ComplianceVerdict::Compliant16k
    } else if n >= MINIMUM_PAGE_ALIGNMENT {
        ComplianceVerdict::NotCompliant
    } else {
        ComplianceVerdict::InvalidAlignment
    }
}

/// Display tone for a summary status; frontends map this to terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Good,
    Bad,
    Caution,
}

/// Human-facing status for a binary's last LOAD alignment.
///
/// The label text distinguishes a non-power-of-two from a power of two that
/// is simply below the minimum page size.
pub fn summary_status(align: Option<u64>) -> (String, StatusTone) {
    match align {
        None => ("UNKNOWN".to_string(), StatusTone::Caution),
        Some(n) if !is_power_of_two(n) => {
            (format!("INVALID ALIGNMENT ({n} bytes - not a power of 2)"), StatusTone::Bad)
        }
        Some(n) if n >= COMPLIANT_ALIGNMENT => {
            (format!("COMPLIANT ({n} bytes)"), StatusTone::Good)
        }
        Some(n) if n >= MINIMUM_PAGE_ALIGNMENT => {
            (format!("NOT COMPLIANT ({n} bytes)"), StatusTone::Bad)
        }
        Some(n) => (format!("INVALID ALIGNMENT ({n} bytes)"), StatusTone::Bad),
    }
}
