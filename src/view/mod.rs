//! View layer: derived, read-only snapshots for the rendering layer.
//!
//! The controller owns and mutates state; renderers hold a non-owning read
//! handle and consume [`ViewState`] values. This one-directional flow keeps
//! the rendering layer from ever observing (or causing) a torn state.

pub mod state;

pub use state::ViewState;
