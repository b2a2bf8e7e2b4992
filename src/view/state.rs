//! Derived view-state snapshots.
//!
//! A [`ViewState`] is the immutable, display-ready projection of a
//! controller's state: the post-filter sections, the loading lifecycle, and
//! the presentation booleans derived from them. Snapshots are recomputed on
//! every controller mutation and every query change, and handed to the
//! rendering layer as read-only values; the rendering layer never writes back.
//!
//! The booleans encode one deliberate asymmetry: an error arriving while items
//! are already on screen does *not* switch the view to an error screen. The
//! stale items stay visible (`should_show_list`), and the error value remains
//! available through [`ViewState::error`] for a banner or overlay chosen by
//! the renderer. Only an error with nothing to show becomes a blocking error
//! state.

use crate::controller::LoadingState;
use crate::domain::Section;
use crate::search::SearchState;
use crate::ListConfig;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Display-ready snapshot of a controller's state.
///
/// Contains pre-computed presentation data only; no business logic. The
/// sections have already been filtered by the active search, so `is_empty`
/// and the `should_show_*` booleans describe exactly what the user would see.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T, E> {
    /// Sections surviving the active search filter, in display order.
    ///
    /// A flat list appears as a single untitled section.
    pub sections: Vec<Section<T>>,

    /// The loading lifecycle at snapshot time.
    pub loading: LoadingState<E>,

    /// Whether the filtered collection contains no items.
    pub is_empty: bool,

    /// Whether the renderer should show a loading placeholder.
    ///
    /// True while loading if there is nothing to show, or always while loading
    /// when [`ListConfig::show_skeleton_on_refresh`] is set.
    pub should_show_loading: bool,

    /// Whether the renderer should show a blocking error state.
    ///
    /// True only for an error with no items to keep on screen.
    pub should_show_error: bool,

    /// Whether the renderer should show the list itself.
    pub should_show_list: bool,

    /// Unix timestamp (seconds) of the last successful delivery, if any.
    pub last_loaded_at: Option<i64>,
}

impl<T, E> ViewState<T, E> {
    /// Derives a snapshot from the controller's raw state.
    pub(crate) fn compute(
        sections: &[Section<T>],
        loading: &LoadingState<E>,
        search: &SearchState<T>,
        config: &ListConfig,
        last_loaded_at: Option<i64>,
    ) -> Self
    where
        T: Clone,
        E: Clone,
    {
        let filtered = search.apply_to_sections(sections);
        let is_empty = filtered.iter().all(Section::is_empty);

        let should_show_loading =
            loading.is_loading() && (is_empty || config.show_skeleton_on_refresh);
        let should_show_error = loading.is_error() && is_empty;
        let should_show_list = !should_show_loading && !should_show_error;

        Self {
            sections: filtered,
            loading: loading.clone(),
            is_empty,
            should_show_loading,
            should_show_error,
            should_show_list,
            last_loaded_at,
        }
    }

    /// Iterates the filtered items across all sections, in display order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.sections.iter().flat_map(|section| section.items.iter())
    }

    /// Returns the total number of filtered items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Returns the source error from the last delivery, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&E> {
        self.loading.error()
    }

    /// Returns a human-readable string describing how long ago data was
    /// last delivered successfully, or `None` if it never was.
    ///
    /// The format varies based on the time elapsed:
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago" (e.g., "5m ago")
    /// - Less than 1 day: "Xh ago" (e.g., "3h ago")
    /// - 1 day or more: "Xd ago" (e.g., "7d ago")
    #[must_use]
    pub fn refreshed_ago(&self) -> Option<String> {
        let loaded_at = self.last_loaded_at?;
        let diff = chrono::Utc::now().timestamp() - loaded_at;

        let formatted = if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        };
        Some(formatted)
    }
}
