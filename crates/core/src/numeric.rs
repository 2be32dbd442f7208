//! Numeric normalization for alignment tokens.

/// Parse an alignment token as it appears in a dump.
///
/// A case-insensitive `0x` prefix selects base 16; anything else is tried as
/// base 10. Malformed tokens yield `None` rather than an error, so a bad dump
/// degrades to an `unknown` verdict downstream instead of aborting the audit.
pub fn parse_align(token: &str) -> Option<u64> {
    if token.is_empty() {
        return None;
    }
    let lower = token.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else {
        token.parse().ok()
    }
}

/// True iff `n` is positive with exactly one set bit.
pub fn is_power_of_two(n: u64) -> bool {
    n > 0 && n & (n - 1) == 0
}
