//! Item capabilities consumed by the search engine.
//!
//! This module defines the [`Searchable`] trait, the opt-in capability an item
//! type exposes so the built-in search strategies can match it against a query.
//! Items that cannot (or do not want to) expose string keys can still be
//! filtered through a custom predicate on
//! [`SearchConfiguration`](crate::search::SearchConfiguration), which bypasses
//! this trait entirely.

/// Capability for items that can be matched by the built-in search strategies.
///
/// An implementation exposes an ordered list of string keys to search against,
/// typically the fields a user would expect a search box to look at (title,
/// subtitle, tags). Key order is preserved and may matter to callers computing
/// highlight ranges, but all built-in strategies treat a match on *any* key as
/// a match for the item.
///
/// An item whose keys are all empty or whitespace never matches a non-empty
/// query.
///
/// # Examples
///
/// ```
/// use listflow::Searchable;
///
/// struct Task {
///     title: String,
///     notes: String,
/// }
///
/// impl Searchable for Task {
///     fn search_keys(&self) -> Vec<String> {
///         vec![self.title.clone(), self.notes.clone()]
///     }
/// }
/// ```
pub trait Searchable {
    /// Returns the ordered list of string keys to match queries against.
    fn search_keys(&self) -> Vec<String>;
}

impl Searchable for String {
    fn search_keys(&self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl Searchable for &str {
    fn search_keys(&self) -> Vec<String> {
        vec![(*self).to_string()]
    }
}
