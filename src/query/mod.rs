//! Client-side query cache for paged list endpoints.
//!
//! - [`QueryCoordinator`] drives one list: debounced search, paging,
//!   in-flight deduplication, stale-while-revalidate display
//! - [`QueryCache`] holds the fetched pages with LRU/TTL eviction
//! - [`Mutation`] runs writes and invalidates bound coordinators on success

mod cache;
mod coordinator;
mod debounce;
mod key;
mod mutation;

pub use cache::{CacheEntry, CachePolicy, Freshness, QueryCache};
pub use coordinator::{CoordinatorOptions, InvalidationHandle, QueryCoordinator, QueryEvent};
pub use debounce::Debouncer;
pub use key::{ListQuery, ListResult};
pub use mutation::{Mutation, MutationState};
