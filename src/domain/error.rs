//! Error types for the listflow crate.
//!
//! This module defines the centralized error type [`ListflowError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Failures reported by a data source are deliberately *not* part of this type:
//! they are caller-defined values carried in the
//! [`LoadingState::Error`](crate::controller::LoadingState::Error) state and never
//! surface as crate errors.

use thiserror::Error;

/// The main error type for listflow operations.
///
/// This enum covers the crate's own failure surface: misusing a controller that
/// has no data source, and losing an in-flight subscription task. Errors produced
/// by a data source itself flow through the loading state machine as data instead.
///
/// # Examples
///
/// ```
/// use listflow::{ListflowError, Result};
///
/// fn require_source(configured: bool) -> Result<()> {
///     if configured {
///         Ok(())
///     } else {
///         Err(ListflowError::Source("no data source configured".to_string()))
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ListflowError {
    /// No data source is configured on the controller.
    ///
    /// Occurs when `load()` or `refresh()` is called on a controller that was
    /// constructed from a fixed collection and never given a source factory.
    /// The string contains a description of what went wrong.
    #[error("Data source error: {0}")]
    Source(String),

    /// The in-flight subscription task was lost before delivering its result.
    ///
    /// Occurs when the task driving a data source is aborted, typically because
    /// the controller was dropped while a load was still being awaited. The
    /// string contains details about the task failure.
    #[error("Subscription error: {0}")]
    Subscription(String),
}

/// A specialized `Result` type for listflow operations.
///
/// This is a type alias for `std::result::Result<T, ListflowError>` that simplifies
/// function signatures throughout the codebase.
///
/// # Examples
///
/// ```
/// use listflow::Result;
///
/// fn start_subscription() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ListflowError>;
