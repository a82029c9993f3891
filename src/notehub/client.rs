use color_eyre::Result;
use reqwest::Method;
use tracing::{debug, info};

use super::api_types::{ApiNote, ApiNotesResponse};
use super::types::{CreateNotePayload, Note};
use crate::config::{Config, NoteHubConfig};
use crate::http::{ApiClient, NetworkError};
use crate::query::{ListQuery, ListResult};

/// NoteHub API client
#[derive(Clone)]
pub struct NoteHubClient {
  api: ApiClient,
}

impl NoteHubClient {
  pub fn new(config: &NoteHubConfig) -> Result<Self> {
    let token = Config::get_notehub_token()?;
    Ok(Self {
      api: ApiClient::new(&config.base_url, token)?,
    })
  }

  pub fn host(&self) -> &str {
    self.api.host()
  }

  /// Fetch one page of notes matching the query's search text
  pub async fn fetch_notes(&self, query: &ListQuery) -> Result<ListResult<Note>, NetworkError> {
    debug!(%query, "GET notes");
    let request = self
      .api
      .request(Method::GET, &["notes"])?
      .query(&list_params(query));

    let response: ApiNotesResponse = self.api.send(request, "Failed to fetch notes").await?;
    Ok(response.into())
  }

  pub async fn create_note(&self, payload: &CreateNotePayload) -> Result<Note, NetworkError> {
    let request = self.api.request(Method::POST, &["notes"])?.json(payload);

    let note: ApiNote = self.api.send(request, "Failed to create note").await?;
    info!(id = %note.id, "created note");
    Ok(note.into())
  }

  pub async fn delete_note(&self, id: &str) -> Result<Note, NetworkError> {
    let request = self.api.request(Method::DELETE, &["notes", id])?;

    let note: ApiNote = self.api.send(request, "Failed to delete note").await?;
    info!(id = %note.id, "deleted note");
    Ok(note.into())
  }
}

/// Query string for `GET /notes`; blank search text is left out.
fn list_params(query: &ListQuery) -> Vec<(&'static str, String)> {
  let mut params = vec![
    ("page", query.page.to_string()),
    ("perPage", query.page_size.to_string()),
  ];
  let search = query.search_text.trim();
  if !search.is_empty() {
    params.push(("search", search.to_string()));
  }
  params
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_list_params_without_search() {
    let params = list_params(&ListQuery::new("", 2, 12));
    assert_eq!(
      params,
      vec![("page", "2".to_string()), ("perPage", "12".to_string())]
    );
  }

  #[test]
  fn test_list_params_with_search() {
    let params = list_params(&ListQuery::new(" groceries ", 1, 12));
    assert_eq!(params.last(), Some(&("search", "groceries".to_string())));
  }
}
