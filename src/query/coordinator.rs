//! Paged list queries with debounced search and stale-while-revalidate display.
//!
//! Inspired by TanStack Query, a [`QueryCoordinator`] owns the cache for one
//! list endpoint and decides when to hit the network:
//!
//! - raw search text is debounced before it becomes part of the query key
//! - changing the search text puts the page back to 1
//! - identical queries share one in-flight fetch
//! - the previous page stays on screen until the next one arrives
//! - a result for a query that is no longer active is cached but never shown
//! - mutations bound through an [`InvalidationHandle`] mark everything stale
//!   and refetch the active page
//!
//! # Example
//!
//! ```ignore
//! let client = notes_client.clone();
//! let mut notes = QueryCoordinator::new(options, move |query| {
//!     let client = client.clone();
//!     async move { client.fetch_notes(&query).await }
//! });
//!
//! notes.refresh();
//!
//! // In event loop tick
//! if notes.poll() {
//!     // State changed, trigger re-render
//! }
//!
//! // In render
//! match notes.displayed() {
//!     Some(page) => render_items(&page.items),
//!     None if notes.is_loading() => render_spinner(),
//!     None => render_empty(),
//! }
//! ```

use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use super::cache::{CachePolicy, Freshness, QueryCache};
use super::debounce::Debouncer;
use super::key::{ListQuery, ListResult};
use crate::http::NetworkError;

type FetchFuture<T> = BoxFuture<'static, Result<ListResult<T>, NetworkError>>;

/// A factory creating the fetch future for one query
type FetcherFn<T> = Box<dyn Fn(ListQuery) -> FetchFuture<T> + Send + Sync>;

type FetchOutcome<T> = (ListQuery, Result<ListResult<T>, NetworkError>);

/// Behaviour knobs for one coordinator
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
  pub page_size: u32,
  /// Quiet interval before typed search text takes effect
  pub debounce: Duration,
  /// Disable the query while the search text is blank
  pub require_search: bool,
  pub cache: CachePolicy,
}

impl Default for CoordinatorOptions {
  fn default() -> Self {
    Self {
      page_size: 12,
      debounce: Duration::from_millis(500),
      require_search: false,
      cache: CachePolicy::default(),
    }
  }
}

/// Cache entry transitions, delivered to subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum QueryEvent {
  Loading {
    query: ListQuery,
    active: bool,
  },
  Fetched {
    query: ListQuery,
    active: bool,
    items: usize,
    total_pages: u32,
  },
  Failed {
    query: ListQuery,
    active: bool,
    error: NetworkError,
  },
}

impl QueryEvent {
  pub fn is_active(&self) -> bool {
    match self {
      QueryEvent::Loading { active, .. }
      | QueryEvent::Fetched { active, .. }
      | QueryEvent::Failed { active, .. } => *active,
    }
  }
}

/// Cloneable trigger that invalidates one coordinator's cache.
///
/// Safe to use from spawned tasks; the coordinator applies it on its next
/// [`poll`](QueryCoordinator::poll).
#[derive(Debug, Clone)]
pub struct InvalidationHandle {
  tx: mpsc::UnboundedSender<()>,
}

impl InvalidationHandle {
  pub fn invalidate(&self) {
    let _ = self.tx.send(());
  }
}

/// Coordinates search, paging, caching and invalidation for one list endpoint.
pub struct QueryCoordinator<T> {
  options: CoordinatorOptions,
  fetcher: FetcherFn<T>,
  cache: QueryCache<T>,
  debouncer: Debouncer<String>,
  /// Text as typed, before debouncing
  raw_search: String,
  /// Debounced text used in the query key
  search_text: String,
  page: u32,
  /// Last result shown for an active query, kept while the next one loads
  placeholder: Option<Arc<ListResult<T>>>,
  results_tx: mpsc::UnboundedSender<FetchOutcome<T>>,
  results_rx: mpsc::UnboundedReceiver<FetchOutcome<T>>,
  invalidate_tx: mpsc::UnboundedSender<()>,
  invalidate_rx: mpsc::UnboundedReceiver<()>,
  subscribers: Vec<mpsc::UnboundedSender<QueryEvent>>,
}

impl<T: Send + Sync + 'static> QueryCoordinator<T> {
  /// Create a coordinator around `fetcher`, which is called once per
  /// network fetch with the query to load.
  ///
  /// Nothing is fetched until [`refresh`](Self::refresh) is called.
  pub fn new<F, Fut>(options: CoordinatorOptions, fetcher: F) -> Self
  where
    F: Fn(ListQuery) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ListResult<T>, NetworkError>> + Send + 'static,
  {
    let (results_tx, results_rx) = mpsc::unbounded_channel();
    let (invalidate_tx, invalidate_rx) = mpsc::unbounded_channel();

    Self {
      cache: QueryCache::new(options.cache),
      debouncer: Debouncer::new(options.debounce),
      options,
      fetcher: Box::new(move |query| -> FetchFuture<T> { Box::pin(fetcher(query)) }),
      raw_search: String::new(),
      search_text: String::new(),
      page: 1,
      placeholder: None,
      results_tx,
      results_rx,
      invalidate_tx,
      invalidate_rx,
      subscribers: Vec::new(),
    }
  }

  /// The query currently driving the display, or `None` while disabled.
  pub fn active_query(&self) -> Option<ListQuery> {
    if self.options.require_search && self.search_text.trim().is_empty() {
      return None;
    }
    Some(ListQuery::new(
      self.search_text.clone(),
      self.page,
      self.options.page_size,
    ))
  }

  pub fn is_enabled(&self) -> bool {
    self.active_query().is_some()
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  /// Debounced search text
  pub fn search_text(&self) -> &str {
    &self.search_text
  }

  /// Whether typed text is still waiting out the debounce interval
  pub fn is_settling(&self) -> bool {
    self.debouncer.is_pending()
  }

  /// Feed the latest raw search text. Resets the page to 1 right away; the
  /// text itself joins the query key once input goes quiet.
  pub fn set_search_text(&mut self, text: impl Into<String>) {
    let text = text.into();
    if text == self.raw_search {
      return;
    }
    self.raw_search = text.clone();
    self.debouncer.push(text);

    if self.page != 1 {
      self.page = 1;
      self.refresh();
    }
  }

  pub fn set_page(&mut self, page: u32) {
    let page = page.max(1);
    if page == self.page {
      return;
    }
    self.page = page;
    self.refresh();
  }

  /// Move to the next page if the displayed result has one.
  pub fn next_page(&mut self) -> bool {
    match self.total_pages() {
      Some(total) if self.page < total => {
        self.set_page(self.page + 1);
        true
      }
      _ => false,
    }
  }

  pub fn prev_page(&mut self) -> bool {
    if self.page > 1 {
      self.set_page(self.page - 1);
      true
    } else {
      false
    }
  }

  /// Make sure the active query is loaded or loading. Fresh cached data is
  /// served as is; stale data is shown while it revalidates.
  pub fn refresh(&mut self) {
    let now = Instant::now();
    let query = match self.active_query() {
      Some(query) => query,
      None => {
        self.placeholder = None;
        return;
      }
    };

    self.cache.prune(Some(&query), now);
    self.cache.touch(&query, now);
    if self.cache.needs_fetch(&query, now) {
      self.start_fetch(query);
    }
  }

  /// Fetch the active query regardless of freshness. Joins a fetch that is
  /// already in flight.
  pub fn refetch(&mut self) {
    if let Some(query) = self.active_query() {
      self.start_fetch(query);
    }
  }

  /// Mark every cached page stale and refetch the active one.
  pub fn invalidate(&mut self) {
    debug!(entries = self.cache.len(), "invalidating list cache");
    self.cache.invalidate_all();
    self.refresh();
  }

  pub fn invalidation_handle(&self) -> InvalidationHandle {
    InvalidationHandle {
      tx: self.invalidate_tx.clone(),
    }
  }

  /// Register an observer for cache entry transitions.
  pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<QueryEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    self.subscribers.push(tx);
    rx
  }

  /// Apply settled search text, pending invalidations and finished fetches.
  ///
  /// Returns `true` if anything changed. Call this in the event loop tick.
  pub fn poll(&mut self) -> bool {
    let mut changed = false;

    if let Some(text) = self.debouncer.poll() {
      if text != self.search_text {
        debug!(search = %text, "search text settled");
        self.search_text = text;
        self.refresh();
        changed = true;
      }
    }

    let mut invalidated = false;
    while self.invalidate_rx.try_recv().is_ok() {
      invalidated = true;
    }
    if invalidated {
      self.invalidate();
      changed = true;
    }

    while let Ok((query, outcome)) = self.results_rx.try_recv() {
      self.settle(query, outcome);
      changed = true;
    }

    changed
  }

  /// Result to display: the active query's own data, or the previous
  /// result while the active query has none yet. A failed query with no
  /// data of its own displays nothing.
  pub fn displayed(&self) -> Option<&ListResult<T>> {
    let query = self.active_query()?;
    match self.cache.get(&query) {
      Some(entry) if entry.result.is_some() => entry.result.as_deref(),
      Some(entry) if entry.freshness == Freshness::Error => None,
      _ => self.placeholder.as_deref(),
    }
  }

  /// Whether [`displayed`](Self::displayed) belongs to a previous query
  pub fn is_placeholder(&self) -> bool {
    let Some(query) = self.active_query() else {
      return false;
    };
    match self.cache.get(&query) {
      Some(entry) if entry.result.is_some() || entry.freshness == Freshness::Error => false,
      _ => self.placeholder.is_some(),
    }
  }

  pub fn total_pages(&self) -> Option<u32> {
    self.displayed().map(|result| result.total_pages)
  }

  /// A fetch for the active query is in flight
  pub fn is_fetching(&self) -> bool {
    self
      .active_query()
      .is_some_and(|query| self.cache.is_in_flight(&query))
  }

  /// Fetching with nothing to show yet
  pub fn is_loading(&self) -> bool {
    self.is_fetching() && self.displayed().is_none()
  }

  pub fn error(&self) -> Option<&NetworkError> {
    let query = self.active_query()?;
    let entry = self.cache.get(&query)?;
    match entry.freshness {
      Freshness::Error => entry.error.as_ref(),
      _ => None,
    }
  }

  pub fn is_error(&self) -> bool {
    self.error().is_some()
  }

  fn start_fetch(&mut self, query: ListQuery) {
    if !self.cache.begin_fetch(&query, Instant::now()) {
      debug!(%query, "joining in-flight fetch");
      return;
    }

    debug!(%query, "fetching");
    let active = self.active_query().as_ref() == Some(&query);
    self.notify(QueryEvent::Loading {
      query: query.clone(),
      active,
    });

    let future = (self.fetcher)(query.clone());
    let tx = self.results_tx.clone();
    tokio::spawn(async move {
      let result = future.await;
      // Ignore send errors - the coordinator may have been dropped
      let _ = tx.send((query, result));
    });
  }

  fn settle(&mut self, query: ListQuery, outcome: Result<ListResult<T>, NetworkError>) {
    let active = self.active_query().as_ref() == Some(&query);

    let event = match &outcome {
      Ok(result) => QueryEvent::Fetched {
        query: query.clone(),
        active,
        items: result.items.len(),
        total_pages: result.total_pages,
      },
      Err(error) => QueryEvent::Failed {
        query: query.clone(),
        active,
        error: error.clone(),
      },
    };

    let outcome = outcome.map(Arc::new);
    if active {
      if let Ok(result) = &outcome {
        self.placeholder = Some(Arc::clone(result));
      }
    } else {
      debug!(%query, "superseded result cached, not displayed");
    }

    let stale_on_arrival = self.cache.complete(&query, outcome, Instant::now());
    self.notify(event);

    if stale_on_arrival && active {
      self.start_fetch(query);
    }
  }

  fn notify(&mut self, event: QueryEvent) {
    self
      .subscribers
      .retain(|subscriber| subscriber.send(event.clone()).is_ok());
  }
}

impl<T> std::fmt::Debug for QueryCoordinator<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("QueryCoordinator")
      .field("options", &self.options)
      .field("raw_search", &self.raw_search)
      .field("search_text", &self.search_text)
      .field("page", &self.page)
      .field("cached", &self.cache.len())
      .finish_non_exhaustive()
  }
}
