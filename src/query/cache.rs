//! In-memory cache of list pages, owned by one coordinator.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use super::key::{ListQuery, ListResult};
use crate::http::NetworkError;

/// Freshness of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
  /// Fetched and not invalidated
  Fresh,
  /// Invalidated or past its stale time; still displayable
  Stale,
  /// A fetch is in flight (previous result, if any, is kept)
  Loading,
  /// The last fetch failed
  Error,
}

/// Cached state of one query
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
  pub result: Option<Arc<ListResult<T>>>,
  pub freshness: Freshness,
  pub error: Option<NetworkError>,
  pub fetched_at: Option<Instant>,
  pub last_used: Instant,
  /// Invalidated while its fetch was in flight
  invalidated: bool,
}

impl<T> CacheEntry<T> {
  fn new(now: Instant) -> Self {
    Self {
      result: None,
      freshness: Freshness::Stale,
      error: None,
      fetched_at: None,
      last_used: now,
      invalidated: false,
    }
  }

  pub fn is_loading(&self) -> bool {
    self.freshness == Freshness::Loading
  }
}

/// Eviction and staleness settings
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
  /// Fresh entries younger than this are served without refetching
  pub stale_time: Duration,
  /// Inactive entries unused for this long are dropped
  pub gc_time: Duration,
  /// Upper bound on entries; least recently used inactive ones go first
  pub max_entries: usize,
}

impl Default for CachePolicy {
  fn default() -> Self {
    Self {
      stale_time: Duration::from_secs(30),
      gc_time: Duration::from_secs(300),
      max_entries: 50,
    }
  }
}

/// Page cache keyed by [`ListQuery`].
#[derive(Debug)]
pub struct QueryCache<T> {
  entries: HashMap<ListQuery, CacheEntry<T>>,
  policy: CachePolicy,
}

impl<T> QueryCache<T> {
  pub fn new(policy: CachePolicy) -> Self {
    Self {
      entries: HashMap::new(),
      policy,
    }
  }

  pub fn get(&self, query: &ListQuery) -> Option<&CacheEntry<T>> {
    self.entries.get(query)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_in_flight(&self, query: &ListQuery) -> bool {
    self.entries.get(query).is_some_and(|e| e.is_loading())
  }

  /// Record a use of `query` for LRU/TTL purposes.
  pub fn touch(&mut self, query: &ListQuery, now: Instant) {
    if let Some(entry) = self.entries.get_mut(query) {
      entry.last_used = now;
    }
  }

  /// Whether `query` needs a network fetch to be considered up to date.
  ///
  /// Errored entries are not retried automatically; callers refetch
  /// explicitly.
  pub fn needs_fetch(&self, query: &ListQuery, now: Instant) -> bool {
    match self.entries.get(query) {
      None => true,
      Some(entry) => match entry.freshness {
        Freshness::Loading | Freshness::Error => false,
        Freshness::Stale => true,
        Freshness::Fresh => entry
          .fetched_at
          .map(|t| now.duration_since(t) >= self.policy.stale_time)
          .unwrap_or(true),
      },
    }
  }

  /// Mark `query` as loading. Returns false when a fetch for it is already
  /// in flight, in which case the caller must not issue another one.
  pub fn begin_fetch(&mut self, query: &ListQuery, now: Instant) -> bool {
    let entry = self
      .entries
      .entry(query.clone())
      .or_insert_with(|| CacheEntry::new(now));
    entry.last_used = now;
    if entry.is_loading() {
      return false;
    }
    entry.freshness = Freshness::Loading;
    entry.invalidated = false;
    true
  }

  /// Store the outcome of a fetch. Returns true when the entry was
  /// invalidated while the fetch was in flight, meaning the stored data is
  /// already stale.
  pub fn complete(
    &mut self,
    query: &ListQuery,
    outcome: Result<Arc<ListResult<T>>, NetworkError>,
    now: Instant,
  ) -> bool {
    let entry = self
      .entries
      .entry(query.clone())
      .or_insert_with(|| CacheEntry::new(now));
    let invalidated = std::mem::take(&mut entry.invalidated);

    match outcome {
      Ok(result) => {
        entry.result = Some(result);
        entry.error = None;
        entry.fetched_at = Some(now);
        entry.freshness = if invalidated {
          Freshness::Stale
        } else {
          Freshness::Fresh
        };
      }
      Err(error) => {
        entry.error = Some(error);
        entry.freshness = Freshness::Error;
      }
    }
    invalidated
  }

  /// Mark every entry stale, errored ones included (their error is kept
  /// until the next fetch). In-flight entries are flagged so their results
  /// land as stale.
  pub fn invalidate_all(&mut self) {
    for entry in self.entries.values_mut() {
      match entry.freshness {
        Freshness::Loading => entry.invalidated = true,
        Freshness::Fresh | Freshness::Error => entry.freshness = Freshness::Stale,
        Freshness::Stale => {}
      }
    }
  }

  /// Drop expired and excess entries. The active query and in-flight
  /// entries are never evicted.
  pub fn prune(&mut self, active: Option<&ListQuery>, now: Instant) {
    let gc_time = self.policy.gc_time;
    self.entries.retain(|query, entry| {
      Some(query) == active || entry.is_loading() || now.duration_since(entry.last_used) < gc_time
    });

    while self.entries.len() > self.policy.max_entries {
      let victim = self
        .entries
        .iter()
        .filter(|(query, entry)| Some(*query) != active && !entry.is_loading())
        .min_by_key(|(_, entry)| entry.last_used)
        .map(|(query, _)| query.clone());

      match victim {
        Some(query) => {
          self.entries.remove(&query);
        }
        None => break,
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn q(page: u32) -> ListQuery {
    ListQuery::new("", page, 10)
  }

  fn page(n: u32) -> Arc<ListResult<u32>> {
    Arc::new(ListResult {
      items: vec![n],
      total_pages: 5,
      total_items: None,
    })
  }

  fn policy() -> CachePolicy {
    CachePolicy {
      stale_time: Duration::from_secs(10),
      gc_time: Duration::from_secs(60),
      max_entries: 3,
    }
  }

  #[test]
  fn test_begin_fetch_joins_in_flight() {
    let now = Instant::now();
    let mut cache: QueryCache<u32> = QueryCache::new(policy());
    assert!(cache.begin_fetch(&q(1), now));
    assert!(!cache.begin_fetch(&q(1), now));
    assert!(cache.begin_fetch(&q(2), now));

    cache.complete(&q(1), Ok(page(1)), now);
    assert!(cache.begin_fetch(&q(1), now));
  }

  #[test]
  fn test_needs_fetch_respects_stale_time() {
    let now = Instant::now();
    let mut cache: QueryCache<u32> = QueryCache::new(policy());
    assert!(cache.needs_fetch(&q(1), now));

    cache.begin_fetch(&q(1), now);
    assert!(!cache.needs_fetch(&q(1), now));

    cache.complete(&q(1), Ok(page(1)), now);
    assert!(!cache.needs_fetch(&q(1), now + Duration::from_secs(5)));
    assert!(cache.needs_fetch(&q(1), now + Duration::from_secs(10)));
  }

  #[test]
  fn test_error_keeps_previous_result() {
    let now = Instant::now();
    let mut cache: QueryCache<u32> = QueryCache::new(policy());
    cache.begin_fetch(&q(1), now);
    cache.complete(&q(1), Ok(page(1)), now);
    cache.begin_fetch(&q(1), now);
    cache.complete(&q(1), Err(NetworkError::new("boom")), now);

    let entry = cache.get(&q(1)).unwrap();
    assert_eq!(entry.freshness, Freshness::Error);
    assert_eq!(entry.result.as_deref().map(|r| r.items.clone()), Some(vec![1]));
    assert!(!cache.needs_fetch(&q(1), now));
  }

  #[test]
  fn test_invalidate_all_marks_stale() {
    let now = Instant::now();
    let mut cache: QueryCache<u32> = QueryCache::new(policy());
    for n in 1..=2 {
      cache.begin_fetch(&q(n), now);
      cache.complete(&q(n), Ok(page(n)), now);
    }

    cache.invalidate_all();
    assert_eq!(cache.get(&q(1)).unwrap().freshness, Freshness::Stale);
    assert_eq!(cache.get(&q(2)).unwrap().freshness, Freshness::Stale);
    assert!(cache.needs_fetch(&q(1), now));
  }

  #[test]
  fn test_invalidate_all_retries_errored_entries() {
    let now = Instant::now();
    let mut cache: QueryCache<u32> = QueryCache::new(policy());
    cache.begin_fetch(&q(1), now);
    cache.complete(&q(1), Err(NetworkError::new("boom")), now);
    assert!(!cache.needs_fetch(&q(1), now));

    cache.invalidate_all();
    let entry = cache.get(&q(1)).unwrap();
    assert_eq!(entry.freshness, Freshness::Stale);
    assert!(entry.error.is_some());
    assert!(cache.needs_fetch(&q(1), now));
  }

  #[test]
  fn test_invalidate_during_fetch_lands_stale() {
    let now = Instant::now();
    let mut cache: QueryCache<u32> = QueryCache::new(policy());
    cache.begin_fetch(&q(1), now);
    cache.invalidate_all();

    assert!(cache.complete(&q(1), Ok(page(1)), now));
    assert_eq!(cache.get(&q(1)).unwrap().freshness, Freshness::Stale);

    cache.begin_fetch(&q(1), now);
    assert!(!cache.complete(&q(1), Ok(page(1)), now));
    assert_eq!(cache.get(&q(1)).unwrap().freshness, Freshness::Fresh);
  }

  #[test]
  fn test_prune_drops_expired_inactive_entries() {
    let start = Instant::now();
    let mut cache: QueryCache<u32> = QueryCache::new(policy());
    for n in 1..=3 {
      cache.begin_fetch(&q(n), start);
      cache.complete(&q(n), Ok(page(n)), start);
    }
    cache.begin_fetch(&q(3), start);

    cache.prune(Some(&q(1)), start + Duration::from_secs(120));

    // active and in-flight survive, the idle one expires
    assert!(cache.get(&q(1)).is_some());
    assert!(cache.get(&q(2)).is_none());
    assert!(cache.get(&q(3)).is_some());
  }

  #[test]
  fn test_prune_evicts_least_recently_used() {
    let start = Instant::now();
    let mut cache: QueryCache<u32> = QueryCache::new(policy());
    for n in 1..=4 {
      let at = start + Duration::from_secs(n as u64);
      cache.begin_fetch(&q(n), at);
      cache.complete(&q(n), Ok(page(n)), at);
    }
    cache.touch(&q(1), start + Duration::from_secs(10));

    cache.prune(Some(&q(4)), start + Duration::from_secs(11));

    assert_eq!(cache.len(), 3);
    assert!(cache.get(&q(1)).is_some());
    assert!(cache.get(&q(2)).is_none());
    assert!(cache.get(&q(3)).is_some());
    assert!(cache.get(&q(4)).is_some());
  }
}
