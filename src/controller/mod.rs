//! Controller layer: the loading lifecycle and the subscription machinery.
//!
//! This module owns everything stateful in the crate. [`ListController`]
//! executes source factories with at-most-one-active-subscription discipline,
//! mutates the loading lifecycle, and republishes derived snapshots on every
//! change. The surrounding types ([`LoadingState`], the source factory traits)
//! are the vocabulary it shares with callers.
//!
//! # Organization
//!
//! - [`loading`]: The four-state loading lifecycle
//! - [`source`]: Data source factory traits and the flat-to-sectioned adapter
//! - [`controller`]: The data subscription controller

pub mod controller;
pub mod loading;
pub mod source;

pub use controller::ListController;
pub use loading::LoadingState;
pub use source::{ItemSource, SectionSource};
