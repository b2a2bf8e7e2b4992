//! Data source factories.
//!
//! A controller never holds a cached future or stream: it holds a *factory*
//! that is re-invoked on every load and refresh. Any external context captured
//! by the factory (pagination cursors, filter parameters, auth tokens) is
//! therefore re-read at call time, which is what makes pull-to-refresh observe
//! the caller's latest state without the controller knowing about that
//! context's type.
//!
//! Both traits are blanket-implemented for closures returning a future, so
//! most callers never name them:
//!
//! ```
//! use listflow::controller::ItemSource;
//!
//! fn accepts_source(_: impl ItemSource<String, String>) {}
//!
//! accepts_source(|| async { Ok(vec!["Buy milk".to_string()]) });
//! ```

use crate::domain::Section;
use futures_util::future::BoxFuture;
use std::future::Future;

/// Factory producing one asynchronous load of a flat item collection.
///
/// `produce` is called once per load attempt and must return a fresh future
/// each time. The error type is caller-defined and is carried through the
/// loading state machine unmodified.
pub trait ItemSource<T, E>: Send + Sync {
    /// Starts one load and returns the future that will deliver its result.
    fn produce(&self) -> BoxFuture<'static, Result<Vec<T>, E>>;
}

/// Factory producing one asynchronous load of a sectioned collection.
///
/// The sectioned counterpart of [`ItemSource`]; everything said there applies.
pub trait SectionSource<T, E>: Send + Sync {
    /// Starts one load and returns the future that will deliver its result.
    fn produce(&self) -> BoxFuture<'static, Result<Vec<Section<T>>, E>>;
}

impl<F, Fut, T, E> ItemSource<T, E> for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
{
    fn produce(&self) -> BoxFuture<'static, Result<Vec<T>, E>> {
        Box::pin((self)())
    }
}

impl<F, Fut, T, E> SectionSource<T, E> for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Section<T>>, E>> + Send + 'static,
{
    fn produce(&self) -> BoxFuture<'static, Result<Vec<Section<T>>, E>> {
        Box::pin((self)())
    }
}

/// Adapter carrying a flat source through the sectioned code path.
///
/// The produced items are wrapped in a single untitled section, which is the
/// internal representation of a flat list.
pub(crate) struct FlatSource<S>(S);

impl<S> FlatSource<S> {
    pub(crate) fn new(source: S) -> Self {
        Self(source)
    }
}

impl<S, T, E> SectionSource<T, E> for FlatSource<S>
where
    S: ItemSource<T, E>,
    T: Send + 'static,
    E: Send + 'static,
{
    fn produce(&self) -> BoxFuture<'static, Result<Vec<Section<T>>, E>> {
        let load = self.0.produce();
        Box::pin(async move { load.await.map(|items| vec![Section::untitled(items)]) })
    }
}
