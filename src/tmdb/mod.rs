//! TMDB movie search.

pub mod api_types;
pub mod client;
pub mod types;

pub use client::TmdbClient;
pub use types::Movie;

/// Fixed by TMDB for search endpoints
pub const PAGE_SIZE: u32 = 20;
