//! Match-range computation for search highlighting.
//!
//! Renderers often want to emphasise the parts of an item's text that caused
//! it to match the current query. [`match_ranges`] computes those ranges for a
//! given strategy without performing any rendering itself: it returns
//! half-open `(start, end)` position ranges over the case-folded text, which
//! coincide with byte offsets into the original text for ASCII content.
//!
//! The helpers here are pure; how (or whether) the ranges are displayed is
//! entirely the rendering layer's decision.

use crate::search::normalize::{normalize, tokenize};
use crate::search::strategy::SearchStrategy;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::BTreeSet;

/// Computes highlight ranges for one piece of item text under a strategy.
///
/// Returns half-open `(start, end)` ranges, ordered and non-overlapping.
/// Overlapping or adjacent matches (for example two tokens hitting the same
/// region) are merged. A blank query produces no ranges: the whole collection
/// matches, but nothing specific is worth emphasising.
///
/// # Examples
///
/// ```
/// use listflow::search::{match_ranges, SearchStrategy};
///
/// let ranges = match_ranges(SearchStrategy::Partial, "Buy milk", "milk");
/// assert_eq!(ranges, vec![(4, 8)]);
/// ```
#[must_use]
pub fn match_ranges(strategy: SearchStrategy, text: &str, query: &str) -> Vec<(usize, usize)> {
    match strategy {
        SearchStrategy::Partial => substring_ranges(text, &normalize(query)),
        SearchStrategy::Exact => {
            if !normalize(query).is_empty() && normalize(text) == normalize(query) {
                vec![(0, text.len())]
            } else {
                Vec::new()
            }
        }
        SearchStrategy::Tokenized => {
            let mut positions = BTreeSet::new();
            for token in tokenize(query) {
                for (start, end) in substring_ranges(text, &token) {
                    positions.extend(start..end);
                }
            }
            coalesce_positions(positions)
        }
        SearchStrategy::Fuzzy => fuzzy_ranges(text, query),
    }
}

/// Finds every non-overlapping occurrence of an already-normalized needle.
fn substring_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }
    text.to_lowercase()
        .match_indices(needle)
        .map(|(start, hit)| (start, start + hit.len()))
        .collect()
}

/// Computes ranges for fuzzy matches by coalescing the matcher's hit positions.
fn fuzzy_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let query = normalize(query);
    if query.is_empty() {
        return Vec::new();
    }
    let matcher = SkimMatcherV2::default();
    match matcher.fuzzy_indices(text, &query) {
        Some((_score, indices)) => coalesce_positions(indices),
        None => Vec::new(),
    }
}

/// Merges sorted positions into half-open ranges, joining consecutive runs.
fn coalesce_positions(positions: impl IntoIterator<Item = usize>) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    for position in positions {
        match run {
            Some((start, end)) if position == end => run = Some((start, end + 1)),
            Some(done) => {
                ranges.push(done);
                run = Some((position, position + 1));
            }
            None => run = Some((position, position + 1)),
        }
    }

    if let Some(done) = run {
        ranges.push(done);
    }
    ranges
}
