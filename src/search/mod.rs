//! Search engine: strategies, filtering, and highlight ranges.
//!
//! This module implements a pure, synchronous text-search layer over flat and
//! sectioned item collections. It has no hidden state: filtering is a function
//! of the collection, the query, and a [`SearchConfiguration`], and never
//! mutates its inputs.
//!
//! # Organization
//!
//! - [`normalize`](mod@normalize): Shared query/key normalization utilities
//! - [`strategy`]: Built-in strategies and the match configuration
//! - [`filter`]: Collection filtering for flat and sectioned lists
//! - [`highlight`]: Match-range computation for emphasis rendering
//!
//! # Example
//!
//! ```
//! use listflow::search::{SearchConfiguration, SearchState, SearchStrategy};
//! use listflow::Section;
//!
//! let mut search = SearchState::new(SearchConfiguration::with_strategy(
//!     SearchStrategy::Tokenized,
//! ));
//! search.query = "milk buy".to_string();
//!
//! let sections = vec![Section::new(
//!     "Today",
//!     vec!["Buy milk".to_string(), "Read book".to_string()],
//! )];
//! let filtered = search.apply_to_sections(&sections);
//! assert_eq!(filtered[0].items, vec!["Buy milk".to_string()]);
//! ```

pub mod filter;
pub mod highlight;
pub mod normalize;
pub mod strategy;

pub use filter::{filter_items, filter_sections};
pub use highlight::match_ranges;
pub use normalize::{normalize, tokenize};
pub use strategy::{SearchConfiguration, SearchStrategy};

use crate::domain::Section;

/// The current query text paired with its match configuration.
///
/// Owned by whichever component drives the search box; the controller stores
/// one and re-derives its view state whenever either field changes. With no
/// configuration, or with a blank query, the search is inactive and filtering
/// passes collections through unchanged.
#[derive(Debug)]
pub struct SearchState<T> {
    /// The raw query text, exactly as typed.
    pub query: String,

    /// The active match configuration, if any.
    pub configuration: Option<SearchConfiguration<T>>,
}

impl<T> SearchState<T> {
    /// Creates a search state with the given configuration and an empty query.
    #[must_use]
    pub fn new(configuration: SearchConfiguration<T>) -> Self {
        Self {
            query: String::new(),
            configuration: Some(configuration),
        }
    }

    /// Creates a search state with no configuration; filtering is a no-op.
    #[must_use]
    pub fn inactive() -> Self {
        Self {
            query: String::new(),
            configuration: None,
        }
    }

    /// Returns whether this state currently filters anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.configuration
            .as_ref()
            .is_some_and(SearchConfiguration::enabled)
            && !normalize(&self.query).is_empty()
    }

    /// Filters a flat collection under this state.
    #[must_use]
    pub fn apply_to_items(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        filter_items(items, &self.query, self.configuration.as_ref())
    }

    /// Filters a sectioned collection under this state.
    #[must_use]
    pub fn apply_to_sections(&self, sections: &[Section<T>]) -> Vec<Section<T>>
    where
        T: Clone,
    {
        filter_sections(sections, &self.query, self.configuration.as_ref())
    }
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self::inactive()
    }
}

impl<T> Clone for SearchState<T> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            configuration: self.configuration.clone(),
        }
    }
}
