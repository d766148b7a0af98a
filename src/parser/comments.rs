//! Doc-comment block extraction.
//!
//! Only `/** ... */` blocks are documentation; plain `/* ... */` comments
//! are skipped. Extraction preserves source order.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a `/** ... */` block, non-greedy so adjacent blocks stay apart.
static DOC_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\*(.*?)\*/").expect("doc block pattern is valid"));

/// Extract every doc-comment block from stylesheet text.
///
/// Each returned string is the block's inner text with leading `*` gutters
/// stripped and surrounding blank lines trimmed.
pub fn extract_blocks(source: &str) -> Vec<String> {
    DOC_BLOCK
        .captures_iter(source)
        .map(|cap| normalize(&cap[1]))
        .collect()
}

/// Strip the ` * ` gutter convention from a raw block body.
fn normalize(body: &str) -> String {
    let lines: Vec<&str> = body.lines().map(strip_gutter).collect();

    // Trim leading/trailing blank lines, keep interior ones
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Remove an optional leading `*` (and one following space) from a line,
/// along with surrounding whitespace.
fn strip_gutter(line: &str) -> &str {
    let trimmed = line.trim();
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    }
}
