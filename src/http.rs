//! Shared HTTP plumbing for the REST services.
//!
//! Every request carries the service's bearer token. Transport failures and
//! non-2xx responses are converted to [`NetworkError`] here, so callers above
//! this layer only ever see one error kind.

use color_eyre::{eyre::eyre, Result};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Failure of a remote call, with an optional server-supplied message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message.as_deref().unwrap_or("Network request failed"))]
pub struct NetworkError {
  /// HTTP status, when the server answered at all
  pub status: Option<u16>,
  pub message: Option<String>,
}

impl NetworkError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      status: None,
      message: Some(message.into()),
    }
  }

  /// Build from a non-2xx response body, falling back to `fallback` when the
  /// body carries no usable message.
  pub fn from_response(status: StatusCode, body: &str, fallback: &str) -> Self {
    Self {
      status: Some(status.as_u16()),
      message: Some(error_message(body).unwrap_or_else(|| fallback.to_string())),
    }
  }
}

/// Error body shapes: NoteHub uses `message`, TMDB uses `status_message`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
  message: Option<String>,
  status_message: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
  let parsed: ApiErrorBody = serde_json::from_str(body).ok()?;
  parsed
    .message
    .or(parsed.status_message)
    .filter(|m| !m.trim().is_empty())
}

/// reqwest client bound to one service base URL and bearer token.
#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  base: Url,
  token: String,
}

impl ApiClient {
  pub fn new(base_url: &str, token: String) -> Result<Self> {
    let normalized = if base_url.ends_with('/') {
      base_url.to_string()
    } else {
      format!("{}/", base_url)
    };
    let base =
      Url::parse(&normalized).map_err(|e| eyre!("Invalid base URL {}: {}", base_url, e))?;

    let http = reqwest::Client::builder()
      .user_agent(concat!("noteflix/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, base, token })
  }

  /// Host part of the base URL, for the header bar
  pub fn host(&self) -> &str {
    self.base.host_str().unwrap_or("")
  }

  /// Append path segments to the base URL. Each segment is
  /// percent-encoded, so ids can't add path components.
  pub fn endpoint(&self, segments: &[&str]) -> Result<Url, NetworkError> {
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|_| NetworkError::new(format!("Base URL {} cannot have a path", self.base)))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, NetworkError> {
    let url = self.endpoint(segments)?;
    Ok(self.http.request(method, url).bearer_auth(&self.token))
  }

  /// Send a request and decode a JSON body. `fallback` becomes the error
  /// message when neither the transport nor the server explains the failure.
  pub async fn send<T: DeserializeOwned>(
    &self,
    request: RequestBuilder,
    fallback: &str,
  ) -> Result<T, NetworkError> {
    let response = request.send().await.map_err(|e| {
      warn!(error = %e, "request failed");
      NetworkError {
        status: e.status().map(|s| s.as_u16()),
        message: Some(fallback.to_string()),
      }
    })?;

    let status = response.status();
    debug!(url = %response.url(), %status, "response");

    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      let error = NetworkError::from_response(status, &body, fallback);
      warn!(%status, message = ?error.message, "request rejected");
      return Err(error);
    }

    response.json::<T>().await.map_err(|e| {
      warn!(error = %e, "failed to decode response");
      NetworkError {
        status: Some(status.as_u16()),
        message: Some(fallback.to_string()),
      }
    })
  }
}
