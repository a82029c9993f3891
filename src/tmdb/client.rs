use color_eyre::Result;
use reqwest::Method;
use tracing::debug;

use super::api_types::ApiSearchResponse;
use super::types::Movie;
use crate::config::{Config, TmdbConfig};
use crate::http::{ApiClient, NetworkError};
use crate::query::{ListQuery, ListResult};

/// TMDB API client (movie search only)
#[derive(Clone)]
pub struct TmdbClient {
  api: ApiClient,
  image_base_url: String,
}

impl TmdbClient {
  pub fn new(config: &TmdbConfig) -> Result<Self> {
    let token = Config::get_tmdb_token()?;
    Ok(Self {
      api: ApiClient::new(&config.base_url, token)?,
      image_base_url: config.image_base_url.clone(),
    })
  }

  pub fn host(&self) -> &str {
    self.api.host()
  }

  pub fn image_base_url(&self) -> &str {
    &self.image_base_url
  }

  /// Search movies by title. TMDB fixes the page size at 20, so the
  /// query's page size only keys the cache.
  pub async fn search_movies(&self, query: &ListQuery) -> Result<ListResult<Movie>, NetworkError> {
    debug!(%query, "GET search/movie");
    let request = self
      .api
      .request(Method::GET, &["search", "movie"])?
      .query(&search_params(query));

    let response: ApiSearchResponse = self.api.send(request, "Failed to search movies").await?;
    Ok(response.into())
  }
}

fn search_params(query: &ListQuery) -> [(&'static str, String); 2] {
  [
    ("query", query.search_text.trim().to_string()),
    ("page", query.page.to_string()),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_search_params() {
    let params = search_params(&ListQuery::new("  batman ", 2, 20));
    assert_eq!(
      params,
      [("query", "batman".to_string()), ("page", "2".to_string())]
    );
  }
}
