//! Sectioned collection model.
//!
//! This module defines [`Section`], an ordered, titled group of items used by
//! controllers and the search engine to represent grouped lists. A flat list is
//! carried as a single untitled section, so every code path downstream of the
//! controller only ever deals with one shape.
//!
//! Sections are replaced wholesale on each successful delivery; there is no
//! incremental diffing. Item identity is the host item type's concern (a stable
//! key supplied by the application), never an index into a section.

use serde::{Deserialize, Serialize};

/// An ordered, titled group of items within a sectioned list.
///
/// Section identity for rendering purposes is positional: a sequence of
/// sections carries no identity beyond the items it contains. The optional
/// `title` and `footer` are opaque display strings; the controller and search
/// engine never match or reorder sections by them.
///
/// # Examples
///
/// ```
/// use listflow::Section;
///
/// let section = Section::new("Groceries", vec!["Buy milk", "Buy eggs"])
///     .with_footer("2 open tasks");
/// assert_eq!(section.len(), 2);
/// assert_eq!(section.title.as_deref(), Some("Groceries"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<T> {
    /// Optional header text displayed above the section's items.
    pub title: Option<String>,

    /// The items contained in this section, in display order.
    pub items: Vec<T>,

    /// Optional footer text displayed below the section's items.
    pub footer: Option<String>,
}

impl<T> Section<T> {
    /// Creates a titled section with no footer.
    #[must_use]
    pub fn new(title: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            title: Some(title.into()),
            items,
            footer: None,
        }
    }

    /// Creates a section with no title and no footer.
    ///
    /// This is the shape used internally to carry a flat item list through
    /// sectioned code paths.
    #[must_use]
    pub fn untitled(items: Vec<T>) -> Self {
        Self {
            title: None,
            items,
            footer: None,
        }
    }

    /// Attaches a footer to the section.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Returns `true` if the section contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Builds sections by positionally pairing item groups with titles.
    ///
    /// Groups and titles are zipped: the constructed section count equals the
    /// *shorter* of the two inputs, and any trailing groups or titles beyond
    /// that length are silently dropped. Callers that need every group to
    /// survive must supply a title for each one.
    ///
    /// # Examples
    ///
    /// ```
    /// use listflow::Section;
    ///
    /// let sections = Section::from_parallel(
    ///     vec![vec!["a"], vec!["b"], vec!["c"]],
    ///     vec!["First".to_string(), "Second".to_string()],
    /// );
    /// assert_eq!(sections.len(), 2);
    /// assert_eq!(sections[1].items, vec!["b"]);
    /// ```
    #[must_use]
    pub fn from_parallel(groups: Vec<Vec<T>>, titles: Vec<String>) -> Vec<Section<T>> {
        groups
            .into_iter()
            .zip(titles)
            .map(|(items, title)| Section::new(title, items))
            .collect()
    }
}
