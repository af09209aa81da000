//! List/detail coordination: the "all blogs" query, the detail query gated on
//! the current selection, and the create mutation that invalidates the list.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use shared::domain::{Blog, BlogId, CreateBlogInput};
use tokio::{
    sync::{broadcast, oneshot, Mutex},
    task::JoinHandle,
    time::Instant,
};
use tracing::{debug, info, warn};

use crate::{
    api::BlogApi,
    cache::QueryCache,
    error::ClientError,
    types::{CoordinatorEvent, CoordinatorOptions, CoordinatorSnapshot, DetailState},
};

const ALL_BLOGS: &str = "blogs";

type ListResult = Result<Vec<Blog>, ClientError>;

pub struct BlogCoordinator {
    api: Arc<dyn BlogApi>,
    options: CoordinatorOptions,
    inner: Mutex<CoordinatorState>,
    creates_in_flight: AtomicUsize,
    events: broadcast::Sender<CoordinatorEvent>,
}

struct CoordinatorState {
    list_cache: QueryCache<&'static str, Vec<Blog>>,
    detail_cache: QueryCache<BlogId, Blog>,
    list_in_flight: usize,
    /// Sequence number handed to the most recently dispatched list fetch.
    list_requested: u64,
    /// Sequence number of the newest list fetch whose result was applied.
    list_applied: u64,
    /// List fetches numbered at or below this were dispatched before the last invalidation.
    list_invalidated_through: u64,
    /// Callers waiting on the list fetch with the given sequence number.
    list_waiters: HashMap<u64, Vec<oneshot::Sender<ListResult>>>,
    list_error: Option<ClientError>,
    selected_id: Option<BlogId>,
    /// Bumped on every selection change; in-flight detail fetches carry the value they saw.
    selection_generation: u64,
    detail: DetailState,
}

impl CoordinatorState {
    /// Newest in-flight list fetch dispatched after the last invalidation, if any.
    fn joinable_list_fetch(&self) -> Option<u64> {
        let seq = self.list_requested;
        (self.list_waiters.contains_key(&seq) && seq > self.list_invalidated_through)
            .then_some(seq)
    }

    fn begin_list_fetch(&mut self) -> u64 {
        self.list_in_flight += 1;
        self.list_requested += 1;
        self.list_waiters.insert(self.list_requested, Vec::new());
        self.list_requested
    }
}

/// Holds `creating` up until the create request finishes or its future is dropped.
struct CreateInFlight<'a>(&'a AtomicUsize);

impl<'a> CreateInFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for CreateInFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl BlogCoordinator {
    pub fn new(api: Arc<dyn BlogApi>, options: CoordinatorOptions) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            api,
            inner: Mutex::new(CoordinatorState {
                list_cache: QueryCache::new(options.stale_time),
                detail_cache: QueryCache::new(options.stale_time),
                list_in_flight: 0,
                list_requested: 0,
                list_applied: 0,
                list_invalidated_through: 0,
                list_waiters: HashMap::new(),
                list_error: None,
                selected_id: None,
                selection_generation: 0,
                detail: DetailState::NoSelection,
            }),
            options,
            creates_in_flight: AtomicUsize::new(0),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> CoordinatorSnapshot {
        let guard = self.inner.lock().await;
        let blogs = guard.list_cache.peek(&ALL_BLOGS);
        CoordinatorSnapshot {
            list_loading: blogs.is_none() && guard.list_in_flight > 0,
            list_fetching: guard.list_in_flight > 0,
            blogs: blogs.unwrap_or_default(),
            list_error: guard.list_error.clone(),
            selected_id: guard.selected_id,
            detail: guard.detail.clone(),
            creating: self.creates_in_flight.load(Ordering::SeqCst) > 0,
        }
    }

    /// Returns the cached list while it is fresh, otherwise fetches it. A
    /// fetch already in flight since the last invalidation is joined rather
    /// than repeated.
    pub async fn load_blogs(self: &Arc<Self>) -> ListResult {
        self.request_list(false).await
    }

    /// Fetches the list regardless of freshness.
    pub async fn refresh_blogs(self: &Arc<Self>) -> ListResult {
        self.request_list(true).await
    }

    /// Host window regained focus. Only refetches when enabled in the options.
    pub async fn handle_focus(self: &Arc<Self>) -> Result<(), ClientError> {
        if !self.options.refetch_on_focus {
            return Ok(());
        }
        self.load_blogs().await.map(|_| ())
    }

    async fn request_list(self: &Arc<Self>, force: bool) -> ListResult {
        let (tx, rx) = oneshot::channel();
        {
            let mut guard = self.inner.lock().await;
            if !force {
                if let Some(blogs) = guard.list_cache.fresh(&ALL_BLOGS, Instant::now()) {
                    debug!(count = blogs.len(), "coordinator: blog list served from cache");
                    return Ok(blogs);
                }
            }
            let joined = if force {
                None
            } else {
                guard.joinable_list_fetch()
            };
            let seq = match joined {
                Some(seq) => {
                    debug!(seq, "coordinator: joining in-flight blog list fetch");
                    seq
                }
                None => {
                    let seq = guard.begin_list_fetch();
                    self.spawn_list_fetch(seq);
                    seq
                }
            };
            guard.list_waiters.entry(seq).or_default().push(tx);
        }
        rx.await.unwrap_or_else(|_| {
            Err(ClientError::Network(
                "blog list fetch ended without a result".to_string(),
            ))
        })
    }

    /// Runs list fetch `seq` detached from any caller; waiters get the result
    /// through `list_waiters`.
    fn spawn_list_fetch(self: &Arc<Self>, seq: u64) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.fetch_list(seq).await;
        });
    }

    async fn fetch_list(&self, seq: u64) {
        let result = self.api.list_blogs().await;

        let mut guard = self.inner.lock().await;
        guard.list_in_flight = guard.list_in_flight.saturating_sub(1);
        let waiters = guard.list_waiters.remove(&seq).unwrap_or_default();
        let superseded = seq <= guard.list_applied;
        match &result {
            Ok(_) if superseded => {
                drop(guard);
                debug!(seq, "coordinator: dropping superseded blog list response");
            }
            Ok(blogs) => {
                guard.list_applied = seq;
                guard.list_error = None;
                guard
                    .list_cache
                    .store(ALL_BLOGS, blogs.clone(), Instant::now());
                if seq <= guard.list_invalidated_through {
                    guard.list_cache.invalidate(&ALL_BLOGS);
                }
                drop(guard);
                debug!(count = blogs.len(), "coordinator: blog list updated");
                let _ = self.events.send(CoordinatorEvent::ListUpdated);
            }
            Err(err) if superseded => {
                drop(guard);
                debug!(
                    seq,
                    error = %err,
                    "coordinator: ignoring failure of superseded blog list fetch"
                );
            }
            Err(err) => {
                guard.list_error = Some(err.clone());
                drop(guard);
                warn!(error = %err, "coordinator: blog list fetch failed");
                let _ = self.events.send(CoordinatorEvent::Error(err.to_string()));
            }
        }

        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
    }
    /// Selects `id` and starts its detail fetch.
    ///
    /// Returns `None` when no request was needed: the detail cache held a fresh
    /// entry, or a fetch for the same selection is already in flight.
    pub async fn select_blog(self: &Arc<Self>, id: BlogId) -> Option<JoinHandle<()>> {
        let generation = {
            let mut guard = self.inner.lock().await;
            if guard.selected_id == Some(id) && guard.detail == DetailState::Loading(id) {
                return None;
            }
            guard.selection_generation += 1;
            guard.selected_id = Some(id);
            if let Some(blog) = guard.detail_cache.fresh(&id, Instant::now()) {
                guard.detail = DetailState::Loaded(id, blog);
                drop(guard);
                debug!(blog_id = id.0, "coordinator: blog detail served from cache");
                let _ = self.events.send(CoordinatorEvent::DetailUpdated(id));
                return None;
            }
            guard.detail = DetailState::Loading(id);
            guard.selection_generation
        };

        let this = Arc::clone(self);
        Some(tokio::spawn(async move {
            this.fetch_detail(id, generation).await;
        }))
    }

    pub async fn clear_selection(&self) {
        let mut guard = self.inner.lock().await;
        guard.selection_generation += 1;
        guard.selected_id = None;
        guard.detail = DetailState::NoSelection;
    }

    async fn fetch_detail(&self, id: BlogId, generation: u64) {
        let result = self.api.get_blog(id).await;

        let mut guard = self.inner.lock().await;
        if let Ok(blog) = &result {
            guard.detail_cache.store(id, blog.clone(), Instant::now());
        }
        if guard.selection_generation != generation || guard.selected_id != Some(id) {
            debug!(
                blog_id = id.0,
                generation,
                current_generation = guard.selection_generation,
                "coordinator: discarding detail response for superseded selection"
            );
            return;
        }
        guard.detail = match result {
            Ok(blog) => DetailState::Loaded(id, blog),
            Err(err) => {
                warn!(blog_id = id.0, error = %err, "coordinator: blog detail fetch failed");
                let _ = self.events.send(CoordinatorEvent::Error(err.to_string()));
                DetailState::Failed(id, err)
            }
        };
        drop(guard);
        let _ = self.events.send(CoordinatorEvent::DetailUpdated(id));
    }

    /// Submits a new blog. On success the list is invalidated and a refetch
    /// is dispatched in the background, and `BlogCreated` is emitted. A
    /// following [`BlogCoordinator::load_blogs`] joins that refetch.
    pub async fn create_blog(self: &Arc<Self>, input: CreateBlogInput) -> Result<Blog, ClientError> {
        let result = {
            let _creating = CreateInFlight::enter(&self.creates_in_flight);
            self.api.create_blog(&input).await
        };

        match result {
            Ok(blog) => {
                {
                    let mut guard = self.inner.lock().await;
                    guard.list_cache.invalidate(&ALL_BLOGS);
                    guard.list_invalidated_through = guard.list_requested;
                    let seq = guard.begin_list_fetch();
                    self.spawn_list_fetch(seq);
                }
                info!(blog_id = blog.id.0, title = %blog.title, "coordinator: blog created");
                let _ = self.events.send(CoordinatorEvent::BlogCreated(blog.clone()));
                Ok(blog)
            }
            Err(err) => {
                warn!(error = %err, "coordinator: blog creation failed");
                let _ = self.events.send(CoordinatorEvent::Error(err.to_string()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
