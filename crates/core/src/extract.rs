//! Tolerant extraction of LOAD-segment alignment tokens from program-header
//! dumps.
//!
//! Dump layouts differ between readelf implementations and versions: some
//! print one self-contained line per segment under a `Type ... Align` table
//! header, others spread the fields across following lines. Extraction
//! therefore tries an ordered list of strategies per `LOAD` record and
//! resolves to an absent token when all of them miss, instead of guessing a
//! value that was never in the text.

use crate::model::SegmentRecord;
use crate::numeric;

/// Lookahead window (in lines) for the labeled `Align` strategy.
const ALIGN_LOOKAHEAD_LINES: usize = 5;

/// Extract one record per `LOAD` line, preserving dump order.
///
/// Records carry the trimmed raw line, the alignment token (if any strategy
/// matched), and its normalized value (if the token parsed).
pub fn load_segments(dump: &str) -> Vec<SegmentRecord> {
    let lines: Vec<&str> = dump.lines().collect();
    let tabular = has_tabular_header(&lines);

    let mut records = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if !is_load_record(line) {
            continue;
        }
        let token = (if tabular { same_line_token(&lines, idx) } else { None })
            .or_else(|| labeled_lookahead_token(&lines, idx))
            .or_else(|| next_line_token(&lines, idx));
        if token.is_none() {
            log::debug!("no alignment token found for record: {}", line.trim());
        }
        let align_value = token.as_deref().and_then(numeric::parse_align);
        records.push(SegmentRecord {
            line_text: line.trim().to_string(),
            align_token: token,
            align_value,
        });
    }
    records
}

/// A dump is tabular when some line names both the `Type` and `Align`
/// columns, meaning each segment is described by a single line.
fn has_tabular_header(lines: &[&str]) -> bool {
    lines.iter().any(|ln| ln.contains("Type") && ln.contains("Align"))
}

/// A record line starts (after leading whitespace) with the literal token
/// `LOAD` at a word boundary, so `LOADABLE` or a `LOAD` embedded in a symbol
/// name elsewhere on a line never anchors a record.
fn is_load_record(line: &str) -> bool {
    let rest = match line.trim_start().strip_prefix("LOAD") {
        Some(rest) => rest,
        None => return false,
    };
    match rest.chars().next() {
        None => true,
        Some(c) => !(c.is_alphanumeric() || c == '_'),
    }
}

/// Strategy: last numeric-looking token on the `LOAD` line itself.
fn same_line_token(lines: &[&str], idx: usize) -> Option<String> {
    last_numeric_token(lines[idx])
}

/// Strategy: scan the next few lines for an `Align` label (optionally
/// followed by `:` or `=`) immediately followed by a numeric token.
fn labeled_lookahead_token(lines: &[&str], idx: usize) -> Option<String> {
    for line in lines.iter().skip(idx + 1).take(ALIGN_LOOKAHEAD_LINES) {
        if let Some(token) = labeled_align_token(line) {
            return Some(token);
        }
    }
    None
}

/// Strategy: last numeric-looking token of the very next line.
fn next_line_token(lines: &[&str], idx: usize) -> Option<String> {
    lines.get(idx + 1).and_then(|ln| last_numeric_token(ln))
}

/// First `Align` occurrence on the line that is followed by a numeric token.
fn labeled_align_token(line: &str) -> Option<String> {
    for (pos, _) in line.match_indices("Align") {
        let rest = &line[pos + "Align".len()..];
        if let Some(token) = numeric_after_label(rest) {
            return Some(token);
        }
    }
    None
}

/// Parse optional whitespace, an optional single `:` or `=`, optional
/// whitespace, then a numeric token at the front of `rest`.
fn numeric_after_label(rest: &str) -> Option<String> {
    let mut s = rest.trim_start();
    if let Some(first) = s.chars().next() {
        if first == ':' || first == '=' {
            s = s[1..].trim_start();
        }
    }
    leading_numeric_token(s)
}

/// Numeric token at the front of `s`: `0x` plus hex digits, or a decimal run.
/// A bare `0x` with no hex digits degrades to the leading decimal run.
fn leading_numeric_token(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    if s.starts_with("0x") {
        let hex_len = bytes[2..].iter().take_while(|b| b.is_ascii_hexdigit()).count();
        if hex_len > 0 {
            return Some(s[..2 + hex_len].to_string());
        }
    }
    let dec_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if dec_len > 0 {
        Some(s[..dec_len].to_string())
    } else {
        None
    }
}

/// Last whole-token number on a line, either `0x` hex or a plain decimal run.
fn last_numeric_token(line: &str) -> Option<String> {
    line.split_whitespace().filter(|t| is_numeric_token(t)).last().map(|t| t.to_string())
}

fn is_numeric_token(token: &str) -> bool {
    if let Some(hex) = token.strip_prefix("0x") {
        return !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}
