//! Pure filtering over flat and sectioned collections.
//!
//! Filtering is a synchronous projection: inputs are never mutated, item order
//! is preserved, and an inactive search (no configuration, disabled
//! configuration, or blank query) returns the collection unchanged. For
//! sectioned collections, items are filtered independently within each section
//! and a section that ends up empty is dropped entirely; surviving sections
//! keep their title, footer, and original order.

use crate::domain::Section;
use crate::search::normalize::normalize;
use crate::search::strategy::SearchConfiguration;

/// Filters a flat item collection against a query.
///
/// Returns a new collection containing the matching items in their original
/// order. With no configuration, a disabled configuration, or a blank query,
/// the input is returned unchanged.
///
/// # Examples
///
/// ```
/// use listflow::search::{filter_items, SearchConfiguration, SearchStrategy};
///
/// let tasks = vec!["Buy milk".to_string(), "Read book".to_string()];
/// let configuration = SearchConfiguration::with_strategy(SearchStrategy::Partial);
///
/// let hits = filter_items(&tasks, "buy", Some(&configuration));
/// assert_eq!(hits, vec!["Buy milk".to_string()]);
/// ```
#[must_use]
pub fn filter_items<T: Clone>(
    items: &[T],
    query: &str,
    configuration: Option<&SearchConfiguration<T>>,
) -> Vec<T> {
    let Some(configuration) = configuration else {
        return items.to_vec();
    };
    if !configuration.enabled() || normalize(query).is_empty() {
        return items.to_vec();
    }

    let _span = tracing::debug_span!("filter_items", total = items.len(), query_len = query.len())
        .entered();

    let filtered: Vec<T> = items
        .iter()
        .filter(|item| configuration.matches(item, query))
        .cloned()
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "item filter applied");
    filtered
}

/// Filters a sectioned collection against a query.
///
/// Item-level filtering is applied independently within each section. A
/// section left with zero items is dropped, not kept empty; surviving sections
/// preserve their title, footer, and relative order. Sections themselves are
/// never matched or reordered by title.
///
/// # Examples
///
/// ```
/// use listflow::search::{filter_sections, SearchConfiguration, SearchStrategy};
/// use listflow::Section;
///
/// let sections = vec![
///     Section::new("A", vec!["Buy milk".to_string(), "Read book".to_string()]),
///     Section::new("B", vec!["Sleep".to_string()]),
/// ];
/// let configuration = SearchConfiguration::with_strategy(SearchStrategy::Partial);
///
/// let hits = filter_sections(&sections, "buy", Some(&configuration));
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].title.as_deref(), Some("A"));
/// ```
#[must_use]
pub fn filter_sections<T: Clone>(
    sections: &[Section<T>],
    query: &str,
    configuration: Option<&SearchConfiguration<T>>,
) -> Vec<Section<T>> {
    let Some(configuration) = configuration else {
        return sections.to_vec();
    };
    if !configuration.enabled() || normalize(query).is_empty() {
        return sections.to_vec();
    }

    let _span = tracing::debug_span!(
        "filter_sections",
        section_count = sections.len(),
        query_len = query.len()
    )
    .entered();

    let filtered: Vec<Section<T>> = sections
        .iter()
        .filter_map(|section| {
            let items: Vec<T> = section
                .items
                .iter()
                .filter(|item| configuration.matches(item, query))
                .cloned()
                .collect();

            if items.is_empty() {
                None
            } else {
                Some(Section {
                    title: section.title.clone(),
                    items,
                    footer: section.footer.clone(),
                })
            }
        })
        .collect();

    tracing::debug!(surviving_sections = filtered.len(), "section filter applied");
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::strategy::SearchStrategy;

    fn partial() -> SearchConfiguration<String> {
        SearchConfiguration::with_strategy(SearchStrategy::Partial)
    }

    fn tasks() -> Vec<String> {
        vec!["Buy milk".to_string(), "Read book".to_string()]
    }

    #[test]
    fn blank_query_returns_the_original_collection() {
        let configuration = partial();
        assert_eq!(filter_items(&tasks(), "", Some(&configuration)), tasks());
        assert_eq!(filter_items(&tasks(), "  \t", Some(&configuration)), tasks());
    }

    #[test]
    fn missing_configuration_returns_the_original_collection() {
        assert_eq!(filter_items(&tasks(), "buy", None), tasks());
    }

    #[test]
    fn disabled_configuration_returns_the_original_collection() {
        let configuration = partial().with_enabled(false);
        assert_eq!(filter_items(&tasks(), "buy", Some(&configuration)), tasks());
    }

    #[test]
    fn filter_items_keeps_matching_items_in_order() {
        let configuration = partial();
        assert_eq!(
            filter_items(&tasks(), "buy", Some(&configuration)),
            vec!["Buy milk".to_string()]
        );
        assert_eq!(
            filter_items(&tasks(), "b", Some(&configuration)),
            tasks(),
            "both tasks contain a b"
        );
    }

    #[test]
    fn filter_sections_drops_emptied_sections() {
        let sections = vec![
            Section::new("A", vec!["Buy milk".to_string(), "Read book".to_string()]),
            Section::new("B", vec!["Sleep".to_string()]),
        ];
        let configuration = partial();

        let filtered = filter_sections(&sections, "buy", Some(&configuration));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title.as_deref(), Some("A"));
        assert_eq!(filtered[0].items, vec!["Buy milk".to_string()]);
    }

    #[test]
    fn filter_sections_preserves_titles_footers_and_order() {
        let sections = vec![
            Section::new("First", vec!["alpha".to_string()]).with_footer("f1"),
            Section::new("Second", vec!["beta".to_string(), "alphabet".to_string()])
                .with_footer("f2"),
        ];
        let configuration = partial();

        let filtered = filter_sections(&sections, "alpha", Some(&configuration));

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].title.as_deref(), Some("First"));
        assert_eq!(filtered[0].footer.as_deref(), Some("f1"));
        assert_eq!(filtered[1].title.as_deref(), Some("Second"));
        assert_eq!(filtered[1].items, vec!["alphabet".to_string()]);
    }

    #[test]
    fn filter_sections_with_blank_query_keeps_empty_sections() {
        let sections = vec![Section::new("Empty", Vec::<String>::new())];
        let configuration = partial();

        let filtered = filter_sections(&sections, "", Some(&configuration));
        assert_eq!(filtered.len(), 1);
    }
}
