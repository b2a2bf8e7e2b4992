//! Search strategies and match configuration.
//!
//! This module defines the matching rules applied between a query string and an
//! item. The built-in strategies operate on the string keys an item exposes via
//! [`Searchable`]; a caller-supplied predicate bypasses that capability and
//! receives the item directly.
//!
//! Every strategy treats an empty or whitespace-only query as matching every
//! item unconditionally.

use crate::domain::Searchable;
use crate::search::normalize::{normalize, tokenize};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::sync::Arc;

/// Built-in matching rules over an item's searchable keys.
///
/// All strategies are case-insensitive. A strategy only decides *whether* an
/// item matches; ordering of results is always the collection's own order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Matches if any key contains the query as a substring.
    #[default]
    Partial,

    /// Matches if any key, trimmed and case-normalized, equals the trimmed,
    /// case-normalized query exactly.
    Exact,

    /// Splits the query into whitespace-delimited tokens and matches if every
    /// token is a substring of at least one key. Different tokens may match
    /// different keys.
    Tokenized,

    /// Like [`Tokenized`](Self::Tokenized), but each token fuzzy-matches a key
    /// (subsequence scoring via the Skim matcher) instead of requiring an exact
    /// substring.
    Fuzzy,
}

impl SearchStrategy {
    /// Returns whether an item with the given searchable keys matches the query.
    ///
    /// An empty or whitespace-only query matches unconditionally. Keys that are
    /// empty or whitespace never satisfy a non-empty query.
    #[must_use]
    pub fn matches(self, keys: &[String], query: &str) -> bool {
        match self {
            Self::Partial => {
                let query = normalize(query);
                query.is_empty() || keys.iter().any(|key| normalize(key).contains(&query))
            }
            Self::Exact => {
                let query = normalize(query);
                query.is_empty() || keys.iter().any(|key| normalize(key) == query)
            }
            Self::Tokenized => {
                let tokens = tokenize(query);
                tokens
                    .iter()
                    .all(|token| keys.iter().any(|key| normalize(key).contains(token)))
            }
            Self::Fuzzy => {
                let tokens = tokenize(query);
                if tokens.is_empty() {
                    return true;
                }
                let matcher = SkimMatcherV2::default();
                tokens.iter().all(|token| {
                    keys.iter()
                        .any(|key| matcher.fuzzy_match(&key.to_lowercase(), token).is_some())
                })
            }
        }
    }
}

/// A configured match function plus its enablement flag.
///
/// Constructed either from a built-in [`SearchStrategy`] over an item's
/// searchable keys, or from a caller-supplied predicate that receives the item
/// and the raw query directly. A disabled configuration filters nothing.
///
/// # Examples
///
/// ```
/// use listflow::search::{SearchConfiguration, SearchStrategy};
///
/// let by_keys: SearchConfiguration<String> =
///     SearchConfiguration::with_strategy(SearchStrategy::Partial);
/// assert!(by_keys.matches(&"Buy milk".to_string(), "buy"));
///
/// let by_length: SearchConfiguration<String> =
///     SearchConfiguration::custom(|item: &String, query| item.len() >= query.len());
/// assert!(by_length.matches(&"long enough".to_string(), "short"));
/// ```
pub struct SearchConfiguration<T> {
    matcher: Arc<dyn Fn(&T, &str) -> bool + Send + Sync>,
    enabled: bool,
}

impl<T> SearchConfiguration<T> {
    /// Creates a configuration from a caller-supplied predicate.
    ///
    /// The predicate receives the item and the raw, un-normalized query. It is
    /// only consulted for non-blank queries; a blank query always matches.
    pub fn custom<F>(matcher: F) -> Self
    where
        F: Fn(&T, &str) -> bool + Send + Sync + 'static,
    {
        Self {
            matcher: Arc::new(matcher),
            enabled: true,
        }
    }

    /// Returns whether this configuration participates in filtering.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the enablement flag, consuming and returning the configuration.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns whether an item matches the query under this configuration.
    ///
    /// A blank query matches unconditionally, regardless of the underlying
    /// match function. The enablement flag is *not* consulted here; callers
    /// filtering collections check [`enabled`](Self::enabled) first.
    #[must_use]
    pub fn matches(&self, item: &T, query: &str) -> bool {
        if normalize(query).is_empty() {
            return true;
        }
        (self.matcher)(item, query)
    }
}

impl<T: Searchable> SearchConfiguration<T> {
    /// Creates a configuration applying a built-in strategy to the item's
    /// searchable keys.
    #[must_use]
    pub fn with_strategy(strategy: SearchStrategy) -> Self {
        Self {
            matcher: Arc::new(move |item: &T, query: &str| {
                strategy.matches(&item.search_keys(), query)
            }),
            enabled: true,
        }
    }
}

impl<T> Clone for SearchConfiguration<T> {
    fn clone(&self) -> Self {
        Self {
            matcher: Arc::clone(&self.matcher),
            enabled: self.enabled,
        }
    }
}

impl<T> std::fmt::Debug for SearchConfiguration<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfiguration")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
