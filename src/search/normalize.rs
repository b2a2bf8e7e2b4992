//! Query and key normalization utilities.
//!
//! All built-in search strategies funnel their inputs through these helpers so
//! matching is consistently case-insensitive and whitespace-tolerant. They are
//! exposed publicly so custom predicates can reuse the same rules.

/// Normalizes a string for matching: trims surrounding whitespace and
/// lowercases the remainder.
///
/// # Examples
///
/// ```
/// use listflow::search::normalize;
///
/// assert_eq!(normalize("  Buy Milk "), "buy milk");
/// assert_eq!(normalize("\t\n"), "");
/// ```
#[must_use]
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Splits a query into normalized, whitespace-delimited tokens.
///
/// Runs of consecutive whitespace collapse and empty tokens are dropped, so a
/// blank or whitespace-only query yields an empty token list.
///
/// # Examples
///
/// ```
/// use listflow::search::tokenize;
///
/// assert_eq!(tokenize("  Milk   BUY "), vec!["milk", "buy"]);
/// assert!(tokenize("   ").is_empty());
/// ```
#[must_use]
pub fn tokenize(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_lowercase).collect()
}
