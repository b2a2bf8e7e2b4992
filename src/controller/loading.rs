//! Loading lifecycle state.
//!
//! A controller's data passes through a four-state lifecycle: it starts
//! [`Idle`](LoadingState::Idle) (only before the first load attempt), moves to
//! [`Loading`](LoadingState::Loading) whenever a load or refresh begins, and
//! each loading phase resolves to exactly one of
//! [`Loaded`](LoadingState::Loaded) or [`Error`](LoadingState::Error). There
//! are no other transitions; driving the state differently is a programming
//! error in the controller, not a runtime condition to recover from.

/// The load lifecycle of a controller's collection.
///
/// The error payload is the caller-defined failure type returned by the data
/// source, carried through unmodified. A superseded delivery is never an
/// error; its result is silently discarded and the state is whatever the
/// current generation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingState<E> {
    /// No load has been attempted yet.
    Idle,

    /// A load or refresh is in flight.
    Loading,

    /// The most recent load delivered successfully.
    Loaded,

    /// The most recent load failed with the source's error value.
    Error(E),
}

impl<E> LoadingState<E> {
    /// Returns `true` before the first load attempt.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` while a load or refresh is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns `true` after a successful delivery.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Returns `true` after a failed delivery.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the stored error value, if the last delivery failed.
    #[must_use]
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_identify_each_state() {
        assert!(LoadingState::<String>::Idle.is_idle());
        assert!(LoadingState::<String>::Loading.is_loading());
        assert!(LoadingState::<String>::Loaded.is_loaded());
        assert!(LoadingState::Error("boom".to_string()).is_error());
        assert!(!LoadingState::<String>::Loaded.is_loading());
    }

    #[test]
    fn error_accessor_exposes_the_source_failure() {
        let state = LoadingState::Error("offline".to_string());
        assert_eq!(state.error().map(String::as_str), Some("offline"));
        assert!(LoadingState::<String>::Loaded.error().is_none());
    }
}
