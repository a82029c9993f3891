use chrono::{Datelike, NaiveDate};

/// Shown when a movie has no backdrop image
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/1280x720?text=No+Image";

/// Movie summary from a search result
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
  pub id: u64,
  pub title: String,
  pub overview: String,
  pub poster_path: Option<String>,
  pub backdrop_path: Option<String>,
  /// `YYYY-MM-DD`, empty when unknown
  pub release_date: String,
  pub vote_average: f64,
}

impl Movie {
  pub fn release_year(&self) -> Option<i32> {
    NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
      .ok()
      .map(|d| d.year())
  }

  /// Rating as displayed, e.g. `7.3/10`
  pub fn rating(&self) -> String {
    format!("{:.1}/10", self.vote_average)
  }

  pub fn poster_url(&self, image_base: &str) -> Option<String> {
    self
      .poster_path
      .as_deref()
      .map(|path| image_url(image_base, "w500", path))
  }

  /// Full-size backdrop, or the placeholder image
  pub fn backdrop_url(&self, image_base: &str) -> String {
    match self.backdrop_path.as_deref() {
      Some(path) => image_url(image_base, "original", path),
      None => PLACEHOLDER_IMAGE.to_string(),
    }
  }
}

fn image_url(image_base: &str, size: &str, path: &str) -> String {
  format!(
    "{}/{}/{}",
    image_base.trim_end_matches('/'),
    size,
    path.trim_start_matches('/')
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  const IMAGES: &str = "https://image.tmdb.org/t/p";

  fn movie() -> Movie {
    Movie {
      id: 268,
      title: "Batman".into(),
      overview: "Gotham".into(),
      poster_path: Some("/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg".into()),
      backdrop_path: None,
      release_date: "1989-06-21".into(),
      vote_average: 7.23,
    }
  }

  #[test]
  fn test_image_urls() {
    let m = movie();
    assert_eq!(
      m.poster_url(IMAGES).unwrap(),
      "https://image.tmdb.org/t/p/w500/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg"
    );
    assert_eq!(m.backdrop_url(IMAGES), PLACEHOLDER_IMAGE);

    let m = Movie {
      backdrop_path: Some("/frDS8A5vIP927KYAxTVVKRIbqZw.jpg".into()),
      ..movie()
    };
    assert_eq!(
      m.backdrop_url("https://image.tmdb.org/t/p/"),
      "https://image.tmdb.org/t/p/original/frDS8A5vIP927KYAxTVVKRIbqZw.jpg"
    );
  }

  #[test]
  fn test_release_year() {
    assert_eq!(movie().release_year(), Some(1989));
    let m = Movie {
      release_date: String::new(),
      ..movie()
    };
    assert_eq!(m.release_year(), None);
  }

  #[test]
  fn test_rating() {
    assert_eq!(movie().rating(), "7.2/10");
  }
}
