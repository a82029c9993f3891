//! Serde-deserializable types matching TMDB search responses.

use serde::Deserialize;

use super::types::Movie;
use crate::query::ListResult;

#[derive(Debug, Deserialize)]
pub struct ApiMovie {
  pub id: u64,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub overview: String,
  pub poster_path: Option<String>,
  pub backdrop_path: Option<String>,
  #[serde(default)]
  pub release_date: String,
  #[serde(default)]
  pub vote_average: f64,
}

/// `GET /search/movie` response
#[derive(Debug, Deserialize)]
pub struct ApiSearchResponse {
  #[serde(default)]
  pub page: u32,
  #[serde(default)]
  pub results: Vec<ApiMovie>,
  #[serde(default)]
  pub total_pages: u32,
  #[serde(default)]
  pub total_results: u64,
}

impl From<ApiMovie> for Movie {
  fn from(m: ApiMovie) -> Self {
    Movie {
      id: m.id,
      title: m.title,
      overview: m.overview,
      poster_path: m.poster_path.filter(|p| !p.is_empty()),
      backdrop_path: m.backdrop_path.filter(|p| !p.is_empty()),
      release_date: m.release_date,
      vote_average: m.vote_average,
    }
  }
}

impl From<ApiSearchResponse> for ListResult<Movie> {
  fn from(resp: ApiSearchResponse) -> Self {
    ListResult {
      items: resp.results.into_iter().map(Movie::from).collect(),
      total_pages: resp.total_pages,
      total_items: Some(resp.total_results),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_search_response_into_list_result() {
    let body = r#"{
      "page": 1,
      "results": [
        {
          "adult": false,
          "backdrop_path": "/frDS8A5vIP927KYAxTVVKRIbqZw.jpg",
          "id": 268,
          "title": "Batman",
          "overview": "Batman must face his most ruthless nemesis.",
          "poster_path": null,
          "release_date": "1989-06-21",
          "vote_average": 7.23
        }
      ],
      "total_pages": 3,
      "total_results": 53
    }"#;

    let resp: ApiSearchResponse = serde_json::from_str(body).unwrap();
    assert_eq!(resp.page, 1);
    let result: ListResult<Movie> = resp.into();

    assert_eq!(result.total_pages, 3);
    assert_eq!(result.total_items, Some(53));
    assert_eq!(result.items[0].title, "Batman");
    assert_eq!(result.items[0].poster_path, None);
  }
}
