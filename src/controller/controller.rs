//! The data subscription controller.
//!
//! [`ListController`] owns a collection, its loading lifecycle, and the data
//! source factory that refreshes it. It enforces the at-most-one-active
//! subscription discipline: every load attempt is stamped with a generation
//! number, and a result is applied only if its generation is still current
//! when it arrives. A slow earlier request can therefore never overwrite a
//! faster later one, regardless of completion order.
//!
//! # Execution contexts
//!
//! Source futures run on the Tokio runtime (the I/O context), spawned so they
//! never block the caller. Delivery (state mutation plus snapshot
//! recomputation) happens under the controller's state lock, the delivery
//! context, so observers never see a torn state. The lock is only ever held
//! across synchronous sections, never across an await.
//!
//! # Cancellation
//!
//! Cancellation is cooperative and has exactly two triggers: starting a new
//! subscription invalidates the previous generation's delivery, and dropping
//! the last controller handle aborts the in-flight task. There is no
//! standalone cancel operation and no timeout.

use crate::controller::loading::LoadingState;
use crate::controller::source::{FlatSource, ItemSource, SectionSource};
use crate::domain::error::{ListflowError, Result};
use crate::domain::Section;
use crate::search::{SearchConfiguration, SearchState};
use crate::view::ViewState;
use crate::ListConfig;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

/// Reactive controller for a list/detail screen's collection.
///
/// A controller is constructed either from a fixed collection (state starts
/// [`Idle`](LoadingState::Idle) and only changes when explicitly driven) or
/// from a source factory (state starts [`Loading`](LoadingState::Loading) and
/// an implicit first load is issued). Handles are cheap to clone; all clones
/// share the same state, and the in-flight subscription is aborted when the
/// last handle is dropped.
///
/// The rendering layer observes the controller exclusively through
/// [`ViewState`] snapshots ([`current`](Self::current) for a one-off read,
/// [`subscribe`](Self::subscribe) for a change stream) and drives it through
/// the explicit operations (`load`, `refresh`, `load_items`, query updates).
///
/// # Examples
///
/// ```no_run
/// use listflow::{ListConfig, ListController};
///
/// # async fn demo() {
/// let controller: ListController<String, String> = ListController::new(
///     || async { Ok(vec!["Buy milk".to_string(), "Read book".to_string()]) },
///     ListConfig::default(),
/// );
///
/// let mut snapshots = controller.subscribe();
/// snapshots.changed().await.unwrap();
/// assert!(snapshots.borrow().loading.is_loaded());
/// # }
/// ```
pub struct ListController<T, E> {
    shared: Arc<RwLock<ControllerState<T, E>>>,
    snapshot: watch::Receiver<ViewState<T, E>>,
}

impl<T, E> Clone for ListController<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            snapshot: self.snapshot.clone(),
        }
    }
}

/// State shared by every handle of one controller.
struct ControllerState<T, E> {
    /// The stored source factory, re-invoked on every load and refresh.
    source: Option<Arc<dyn SectionSource<T, E>>>,

    /// The collection as delivered, before search filtering.
    sections: Vec<Section<T>>,

    /// The loading lifecycle.
    loading: LoadingState<E>,

    /// Delivery token of the current subscription; results stamped with an
    /// older value are discarded.
    generation: u64,

    /// The active query and match configuration.
    search: SearchState<T>,

    /// Presentation configuration consulted when deriving snapshots.
    config: ListConfig,

    /// Unix timestamp of the last successful delivery.
    last_loaded_at: Option<i64>,

    /// Publisher side of the snapshot channel.
    publisher: watch::Sender<ViewState<T, E>>,

    /// Abort handle of the in-flight fetch task, if one is running.
    in_flight: Option<AbortHandle>,
}

impl<T, E> Drop for ControllerState<T, E> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.abort();
        }
    }
}

impl<T, E> ControllerState<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Recomputes the snapshot and hands it to observers.
    fn publish(&self) {
        let snapshot = ViewState::compute(
            &self.sections,
            &self.loading,
            &self.search,
            &self.config,
            self.last_loaded_at,
        );
        let _ = self.publisher.send(snapshot);
    }
}

/// Locks controller state for writing, recovering from poisoning.
///
/// Critical sections never panic while holding the lock, so poisoning cannot
/// leave the state half-mutated.
fn lock_write<T, E>(
    state: &RwLock<ControllerState<T, E>>,
) -> RwLockWriteGuard<'_, ControllerState<T, E>> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Locks controller state for reading, recovering from poisoning.
fn lock_read<T, E>(
    state: &RwLock<ControllerState<T, E>>,
) -> RwLockReadGuard<'_, ControllerState<T, E>> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

/// Spawns the fetch task for one subscription.
///
/// The task invokes the source factory on the runtime, then attempts delivery:
/// it upgrades its weak handle (a dropped controller discards the result),
/// re-checks the generation stamp, and only then mutates state. The task holds
/// no strong reference while the source runs, so dropping the last controller
/// handle both aborts the task and is never prevented by it.
fn spawn_fetch<T, E>(
    shared: &Arc<RwLock<ControllerState<T, E>>>,
    source: Arc<dyn SectionSource<T, E>>,
    generation: u64,
) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    let weak = Arc::downgrade(shared);
    tokio::spawn(async move {
        let outcome = source.produce().await;

        let Some(shared) = weak.upgrade() else {
            tracing::debug!(generation, "controller dropped before delivery");
            return;
        };
        let mut state = lock_write(&shared);

        if state.generation != generation {
            tracing::debug!(
                generation,
                current = state.generation,
                "stale delivery discarded"
            );
            return;
        }

        match outcome {
            Ok(sections) => {
                state.sections = sections;
                state.loading = LoadingState::Loaded;
                state.last_loaded_at = Some(chrono::Utc::now().timestamp());
                tracing::debug!(
                    generation,
                    section_count = state.sections.len(),
                    "delivery applied"
                );
            }
            Err(error) => {
                state.loading = LoadingState::Error(error);
                tracing::debug!(generation, "delivery failed");
            }
        }
        state.in_flight = None;
        state.publish();
    })
}

impl<T, E> ListController<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates a controller over a fixed flat collection.
    ///
    /// The state starts [`Idle`](LoadingState::Idle) and never transitions
    /// unless the controller is explicitly driven (for example by installing a
    /// source via [`load_items`](Self::load_items)).
    #[must_use]
    pub fn fixed(items: Vec<T>, config: ListConfig) -> Self {
        Self::construct(None, vec![Section::untitled(items)], config)
    }

    /// Creates a controller over a fixed sectioned collection.
    #[must_use]
    pub fn fixed_sections(sections: Vec<Section<T>>, config: ListConfig) -> Self {
        Self::construct(None, sections, config)
    }

    /// Creates a controller driven by a flat source factory.
    ///
    /// The state starts [`Loading`](LoadingState::Loading) and the first load
    /// is issued immediately.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime; the implicit first load is
    /// spawned onto it.
    #[must_use]
    pub fn new<S>(source: S, config: ListConfig) -> Self
    where
        S: ItemSource<T, E> + 'static,
    {
        Self::construct_loading(Arc::new(FlatSource::new(source)), config)
    }

    /// Creates a controller driven by a sectioned source factory.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime; the implicit first load is
    /// spawned onto it.
    #[must_use]
    pub fn new_sectioned<S>(source: S, config: ListConfig) -> Self
    where
        S: SectionSource<T, E> + 'static,
    {
        Self::construct_loading(Arc::new(source), config)
    }

    fn construct(
        source: Option<Arc<dyn SectionSource<T, E>>>,
        sections: Vec<Section<T>>,
        config: ListConfig,
    ) -> Self {
        let search = SearchState::inactive();
        let loading = LoadingState::Idle;
        let initial = ViewState::compute(&sections, &loading, &search, &config, None);
        let (publisher, snapshot) = watch::channel(initial);

        let shared = Arc::new(RwLock::new(ControllerState {
            source,
            sections,
            loading,
            generation: 0,
            search,
            config,
            last_loaded_at: None,
            publisher,
            in_flight: None,
        }));

        Self { shared, snapshot }
    }

    fn construct_loading(source: Arc<dyn SectionSource<T, E>>, config: ListConfig) -> Self {
        let controller = Self::construct(Some(source.clone()), Vec::new(), config);

        {
            let mut state = lock_write(&controller.shared);
            state.generation = 1;
            state.loading = LoadingState::Loading;
            state.publish();
            let handle = spawn_fetch(&controller.shared, source, 1);
            state.in_flight = Some(handle.abort_handle());
        }

        controller
    }

    /// Starts a new subscription against the stored source factory.
    ///
    /// Any subscription already active is cancelled first: its delivery token
    /// is invalidated, so its result is silently discarded even if it arrives
    /// later. The state moves to [`Loading`](LoadingState::Loading), the
    /// factory is re-invoked to obtain a fresh future, and on completion the
    /// state becomes [`Loaded`](LoadingState::Loaded) with the delivered
    /// collection, or [`Error`](LoadingState::Error) with the existing
    /// collection left untouched.
    ///
    /// Resolves once the attempt completes, whether its result was applied or
    /// discarded as stale.
    ///
    /// # Errors
    ///
    /// Returns [`ListflowError::Source`] if no source factory is configured,
    /// and [`ListflowError::Subscription`] if the fetch task was aborted
    /// because the controller was dropped mid-flight.
    pub async fn load(&self) -> Result<()> {
        let handle = {
            let mut state = lock_write(&self.shared);
            let source = state
                .source
                .clone()
                .ok_or_else(|| ListflowError::Source("no data source configured".to_string()))?;

            state.generation += 1;
            let generation = state.generation;
            state.loading = LoadingState::Loading;
            state.publish();

            let handle = spawn_fetch(&self.shared, source, generation);
            state.in_flight = Some(handle.abort_handle());
            tracing::debug!(generation, "subscription started");
            handle
        };

        handle
            .await
            .map_err(|error| ListflowError::Subscription(error.to_string()))
    }

    /// Reloads through the currently stored source factory.
    ///
    /// Identical in effect to [`load`](Self::load) and callable from any
    /// state. Because the factory is re-invoked rather than replayed, it
    /// observes whatever external context the caller has mutated since the
    /// previous call, which is what lets pull-to-refresh see fresh
    /// parameters.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub async fn refresh(&self) -> Result<()> {
        self.load().await
    }

    /// Replaces the source factory with a flat source and loads through it.
    ///
    /// Any prior subscription is cancelled by the load that follows.
    ///
    /// # Errors
    ///
    /// Returns [`ListflowError::Subscription`] if the fetch task was aborted
    /// because the controller was dropped mid-flight.
    pub async fn load_items<S>(&self, source: S) -> Result<()>
    where
        S: ItemSource<T, E> + 'static,
    {
        self.replace_source(Arc::new(FlatSource::new(source))).await
    }

    /// Replaces the source factory with a sectioned source and loads through it.
    ///
    /// # Errors
    ///
    /// Same as [`load_items`](Self::load_items).
    pub async fn load_sections<S>(&self, source: S) -> Result<()>
    where
        S: SectionSource<T, E> + 'static,
    {
        self.replace_source(Arc::new(source)).await
    }

    async fn replace_source(&self, source: Arc<dyn SectionSource<T, E>>) -> Result<()> {
        {
            let mut state = lock_write(&self.shared);
            state.source = Some(source);
        }
        self.load().await
    }

    /// Replaces the flat collection immediately, without a loading phase.
    ///
    /// This is the synchronous path for purely local mutation: the loading
    /// state machine is not touched, no subscription starts, and observers see
    /// the new collection in the next snapshot.
    pub fn update_items(&self, items: Vec<T>) {
        self.update_sections(vec![Section::untitled(items)]);
    }

    /// Replaces the sectioned collection immediately, without a loading phase.
    pub fn update_sections(&self, sections: Vec<Section<T>>) {
        let mut state = lock_write(&self.shared);
        state.sections = sections;
        state.publish();
    }

    /// Sets the search query text and republishes the snapshot.
    pub fn set_query(&self, query: impl Into<String>) {
        let mut state = lock_write(&self.shared);
        state.search.query = query.into();
        state.publish();
    }

    /// Installs or clears the search configuration and republishes.
    pub fn set_search(&self, configuration: Option<SearchConfiguration<T>>) {
        let mut state = lock_write(&self.shared);
        state.search.configuration = configuration;
        state.publish();
    }

    /// Replaces the presentation configuration and republishes.
    pub fn set_config(&self, config: ListConfig) {
        let mut state = lock_write(&self.shared);
        state.config = config;
        state.publish();
    }

    /// Returns the current query text.
    #[must_use]
    pub fn query(&self) -> String {
        lock_read(&self.shared).search.query.clone()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn current(&self) -> ViewState<T, E> {
        self.snapshot.borrow().clone()
    }

    /// Returns a receiver observing every snapshot the controller publishes.
    ///
    /// The receiver is read-only: observers can never write back into the
    /// controller through it.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState<T, E>> {
        self.snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchStrategy;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::{mpsc, oneshot};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn current_items(controller: &ListController<String, String>) -> Vec<String> {
        controller.current().items().cloned().collect()
    }

    #[tokio::test]
    async fn fixed_controllers_start_idle_with_their_items() {
        let controller: ListController<String, String> =
            ListController::fixed(strings(&["a", "b"]), ListConfig::default());

        let state = controller.current();
        assert!(state.loading.is_idle());
        assert_eq!(current_items(&controller), strings(&["a", "b"]));
    }

    #[tokio::test]
    async fn source_construction_starts_loading_and_delivers() {
        let controller: ListController<String, String> = ListController::new(
            || async { Ok(strings(&["Buy milk"])) },
            ListConfig::default(),
        );
        assert!(controller.current().loading.is_loading());

        let mut snapshots = controller.subscribe();
        while !snapshots.borrow().loading.is_loaded() {
            snapshots.changed().await.unwrap();
        }
        assert_eq!(current_items(&controller), strings(&["Buy milk"]));
        assert!(controller.current().last_loaded_at.is_some());
    }

    #[tokio::test]
    async fn successful_load_sets_items_and_loaded() {
        let controller: ListController<String, String> =
            ListController::fixed(Vec::new(), ListConfig::default());

        controller
            .load_items(|| async { Ok(strings(&["a", "b"])) })
            .await
            .unwrap();

        let state = controller.current();
        assert!(state.loading.is_loaded());
        assert_eq!(current_items(&controller), strings(&["a", "b"]));
    }

    #[tokio::test]
    async fn failed_load_keeps_existing_items() {
        let controller: ListController<String, String> =
            ListController::fixed(strings(&["keep me"]), ListConfig::default());

        controller
            .load_items(|| async { Err::<Vec<String>, _>("offline".to_string()) })
            .await
            .unwrap();

        let state = controller.current();
        assert_eq!(state.loading.error().map(String::as_str), Some("offline"));
        assert_eq!(current_items(&controller), strings(&["keep me"]));
        assert!(!state.should_show_error, "items on screen suppress the blocking error");
    }

    #[tokio::test]
    async fn load_without_a_source_is_an_error() {
        let controller: ListController<String, String> =
            ListController::fixed(Vec::new(), ListConfig::default());

        let outcome = controller.load().await;
        assert!(matches!(outcome, Err(ListflowError::Source(_))));
        assert!(controller.current().loading.is_idle());
    }

    #[tokio::test]
    async fn refresh_reinvokes_the_stored_factory_with_fresh_context() {
        let page = Arc::new(AtomicUsize::new(1));
        let source_page = Arc::clone(&page);
        let controller: ListController<String, String> =
            ListController::fixed(Vec::new(), ListConfig::default());

        controller
            .load_items(move || {
                let page = source_page.load(Ordering::SeqCst);
                async move { Ok(vec![format!("page-{page}")]) }
            })
            .await
            .unwrap();
        assert_eq!(current_items(&controller), strings(&["page-1"]));

        page.store(2, Ordering::SeqCst);
        controller.refresh().await.unwrap();
        assert_eq!(current_items(&controller), strings(&["page-2"]));
    }

    #[tokio::test]
    async fn stale_results_never_overwrite_newer_ones() {
        let (invoked_tx, mut invoked_rx) = mpsc::unbounded_channel::<usize>();
        let (gate1_tx, gate1_rx) = oneshot::channel::<()>();
        let (gate2_tx, gate2_rx) = oneshot::channel::<()>();
        let gates = Arc::new(Mutex::new(VecDeque::from([gate1_rx, gate2_rx])));

        let calls = Arc::new(AtomicUsize::new(0));
        let source_calls = Arc::clone(&calls);
        let source_gates = Arc::clone(&gates);
        let factory = move || {
            let call = source_calls.fetch_add(1, Ordering::SeqCst) + 1;
            let gate = source_gates.lock().unwrap().pop_front().unwrap();
            invoked_tx.send(call).unwrap();
            async move {
                gate.await.ok();
                Ok(vec![format!("result-{call}")])
            }
        };

        let controller: ListController<String, String> =
            ListController::fixed(Vec::new(), ListConfig::default());

        let first = controller.clone();
        let first_task = tokio::spawn(async move { first.load_items(factory).await });
        assert_eq!(invoked_rx.recv().await, Some(1));

        let second = controller.clone();
        let second_task = tokio::spawn(async move { second.refresh().await });
        assert_eq!(invoked_rx.recv().await, Some(2));

        // Resolve the second (current) subscription first.
        gate2_tx.send(()).unwrap();
        second_task.await.unwrap().unwrap();
        assert_eq!(current_items(&controller), strings(&["result-2"]));
        assert!(controller.current().loading.is_loaded());

        // The first subscription resolves late; its result must be discarded.
        gate1_tx.send(()).unwrap();
        first_task.await.unwrap().unwrap();
        assert_eq!(current_items(&controller), strings(&["result-2"]));
        assert!(controller.current().loading.is_loaded());
    }

    #[tokio::test]
    async fn load_sections_delivers_grouped_collections() {
        let controller: ListController<String, String> =
            ListController::fixed(Vec::new(), ListConfig::default());

        controller
            .load_sections(|| async {
                Ok(vec![
                    Section::new("A", strings(&["a1"])),
                    Section::new("B", strings(&["b1", "b2"])),
                ])
            })
            .await
            .unwrap();

        let state = controller.current();
        assert_eq!(state.sections.len(), 2);
        assert_eq!(state.sections[1].title.as_deref(), Some("B"));
        assert_eq!(state.item_count(), 3);
    }

    #[tokio::test]
    async fn update_sections_bypasses_the_loading_phase() {
        let controller: ListController<String, String> =
            ListController::fixed(strings(&["old"]), ListConfig::default());

        controller.update_sections(vec![Section::new("Local", strings(&["new"]))]);

        let state = controller.current();
        assert!(state.loading.is_idle(), "local mutation must not touch loading");
        assert_eq!(current_items(&controller), strings(&["new"]));
    }

    #[tokio::test]
    async fn query_edits_reproject_the_snapshot() {
        let controller: ListController<String, String> =
            ListController::fixed(strings(&["Buy milk", "Read book"]), ListConfig::default());
        controller.set_search(Some(SearchConfiguration::with_strategy(
            SearchStrategy::Partial,
        )));

        controller.set_query("buy");
        assert_eq!(current_items(&controller), strings(&["Buy milk"]));
        assert_eq!(controller.query(), "buy");

        controller.set_query("");
        assert_eq!(
            current_items(&controller),
            strings(&["Buy milk", "Read book"])
        );
    }

    #[tokio::test]
    async fn subscribers_observe_every_publish() {
        let controller: ListController<String, String> =
            ListController::fixed(Vec::new(), ListConfig::default());
        let mut snapshots = controller.subscribe();

        controller.update_items(strings(&["fresh"]));

        snapshots.changed().await.unwrap();
        let observed: Vec<String> = snapshots.borrow().items().cloned().collect();
        assert_eq!(observed, strings(&["fresh"]));
    }

    #[tokio::test]
    async fn skeleton_flag_is_reflected_mid_refresh() {
        let (gate_tx, gate_rx) = oneshot::channel::<()>();
        let gate = Arc::new(Mutex::new(Some(gate_rx)));

        let controller: ListController<String, String> = ListController::fixed(
            strings(&["existing"]),
            ListConfig {
                show_skeleton_on_refresh: true,
            },
        );

        let source_gate = Arc::clone(&gate);
        let refreshing = controller.clone();
        let task = tokio::spawn(async move {
            refreshing
                .load_items(move || {
                    let gate = source_gate.lock().unwrap().take();
                    async move {
                        if let Some(gate) = gate {
                            gate.await.ok();
                        }
                        Ok(strings(&["fresh"]))
                    }
                })
                .await
        });

        let mut snapshots = controller.subscribe();
        while !snapshots.borrow().loading.is_loading() {
            snapshots.changed().await.unwrap();
        }
        assert!(snapshots.borrow().should_show_loading);

        gate_tx.send(()).unwrap();
        task.await.unwrap().unwrap();
        assert!(controller.current().should_show_list);
    }
}
