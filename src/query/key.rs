//! Query keys and the page results they identify.

/// Parameters identifying one page of a searchable list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
  pub search_text: String,
  /// 1-based
  pub page: u32,
  pub page_size: u32,
}

impl ListQuery {
  pub fn new(search_text: impl Into<String>, page: u32, page_size: u32) -> Self {
    Self {
      search_text: search_text.into(),
      page: page.max(1),
      page_size,
    }
  }
}

impl std::fmt::Display for ListQuery {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{:?} page {} ({} per page)",
      self.search_text, self.page, self.page_size
    )
  }
}

/// One fetched page of results. Never mutated; a refetch replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<T> {
  pub items: Vec<T>,
  pub total_pages: u32,
  /// Not every API reports it
  pub total_items: Option<u64>,
}

impl<T> ListResult<T> {
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn test_page_is_at_least_one() {
    assert_eq!(ListQuery::new("x", 0, 12).page, 1);
  }

  #[test]
  fn test_equivalent_queries_share_a_key() {
    let mut keys = HashSet::new();
    keys.insert(ListQuery::new("batman", 1, 20));
    keys.insert(ListQuery::new("batman", 1, 20));
    keys.insert(ListQuery::new("batman", 2, 20));
    keys.insert(ListQuery::new("batman", 1, 12));
    assert_eq!(keys.len(), 3);
  }
}
