//! Listflow: a reactive list-state controller for list/detail screens.
//!
//! Listflow turns an asynchronous data source into a presentable list state:
//! - Four-state loading lifecycle (idle, loading, loaded, error)
//! - Repeatable refresh against a source factory whose captured context may
//!   change between calls
//! - At-most-one active subscription, with stale results silently discarded
//! - Pluggable text search over flat or sectioned collections, preserving
//!   section structure
//! - Immutable, display-ready view-state snapshots published to observers
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host application (rendering, navigation, input)    │  ← External
//! └─────────────────────────────────────────────────────┘
//!        │ load / refresh / query edits        ▲ snapshots
//!        ▼                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Controller Layer (controller/)                     │  ← State machine
//! │  - Subscription lifecycle + generation stamping     │  ← Source factories
//! │  - Loading state transitions                        │
//! └─────────────────────────────────────────────────────┘
//!         │                            │
//! ┌───────────────────┐     ┌───────────────────────────┐
//! │ Search Layer      │     │ View Layer (view/)        │
//! │ (search/)         │     │ - Derived snapshots       │
//! │ - Strategies      │     │ - Presentation booleans   │
//! │ - Filtering       │     │                           │
//! │ - Highlighting    │     │                           │
//! └───────────────────┘     └───────────────────────────┘
//!         │                            │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Section model, item capabilities, error types    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`controller`]: Subscription controller, loading lifecycle, source traits
//! - [`domain`]: Core data types (sections, search capability, errors)
//! - [`search`]: Strategies, pure filtering, highlight ranges
//! - [`view`]: Derived read-only snapshots for rendering
//!
//! # Examples
//!
//! ## Driving a list from an async source
//!
//! ```no_run
//! use listflow::{ListConfig, ListController};
//!
//! # async fn demo() {
//! let controller: ListController<String, String> = ListController::new(
//!     || async {
//!         // Fetch from wherever data lives; errors flow into the state.
//!         Ok(vec!["Buy milk".to_string(), "Read book".to_string()])
//!     },
//!     ListConfig::default(),
//! );
//!
//! let mut snapshots = controller.subscribe();
//! while snapshots.changed().await.is_ok() {
//!     let state = snapshots.borrow().clone();
//!     if state.should_show_list {
//!         for item in state.items() {
//!             println!("row: {item}");
//!         }
//!         break;
//!     }
//! }
//! # }
//! ```
//!
//! ## Filtering with a search strategy
//!
//! ```
//! use listflow::search::{SearchConfiguration, SearchStrategy};
//! use listflow::{ListConfig, ListController};
//!
//! let controller: ListController<String, String> = ListController::fixed(
//!     vec!["Buy milk".to_string(), "Read book".to_string()],
//!     ListConfig::default(),
//! );
//! controller.set_search(Some(SearchConfiguration::with_strategy(
//!     SearchStrategy::Tokenized,
//! )));
//! controller.set_query("milk buy");
//!
//! let state = controller.current();
//! assert_eq!(state.item_count(), 1);
//! ```
//!
//! # Key Design Decisions
//!
//! ## Source factories, not cached streams
//!
//! A controller stores a zero-argument factory and re-invokes it on every
//! load and refresh. Context captured by the factory (filters, cursors,
//! tokens) is re-read at call time, so refresh observes the caller's latest
//! state without the controller knowing that context's type.
//!
//! ## Generation-stamped delivery
//!
//! Rather than preemptive cancellation, every subscription carries a
//! generation token; delivery compares and discards. At most one
//! subscription's result is ever applied, regardless of completion order.
//!
//! ## One-directional observation
//!
//! The controller owns and mutates state; renderers hold read-only snapshot
//! receivers and drive the controller only through its explicit operations.

pub mod controller;
pub mod domain;
pub mod search;
pub mod view;

pub use controller::{ItemSource, ListController, LoadingState, SectionSource};
pub use domain::{ListflowError, Result, Searchable, Section};
pub use search::{SearchConfiguration, SearchState, SearchStrategy};
pub use view::ViewState;

use serde::{Deserialize, Serialize};

/// Presentation configuration consulted when deriving view-state snapshots.
///
/// # Example
///
/// ```
/// use listflow::ListConfig;
///
/// let config = ListConfig {
///     show_skeleton_on_refresh: true,
/// };
/// assert!(config.show_skeleton_on_refresh);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Whether loading is signaled even when existing items are present.
    ///
    /// When `false` (the default), a refresh with items already on screen
    /// keeps the list visible and only the loading state changes; when `true`,
    /// every loading phase reports `should_show_loading`, letting the renderer
    /// replace the stale list with a skeleton.
    pub show_skeleton_on_refresh: bool,
}
