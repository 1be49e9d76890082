//! Utility functions for string processing.

/// Fold a string for case-insensitive comparison.
///
/// Plain Unicode lowercasing. No diacritic stripping and no whitespace
/// collapsing: "café" does not match "cafe", and "error  tracking" (two
/// spaces) does not match "error tracking". Matching is a literal substring
/// test after folding, nothing fuzzier.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Length of a query as the user perceives it (Unicode scalar values).
///
/// The minimum-length gate and the `query_length` beacon attribute both count
/// characters, so a single "é" is one character even though it is two
/// bytes, and an emoji is one even though it is two UTF-16 units.
pub fn query_len(query: &str) -> usize {
    query.chars().count()
}

/// Escape text for insertion into HTML element content or a quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
