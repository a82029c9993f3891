//! Async write operations that invalidate list queries on success.

use std::future::Future;
use tokio::sync::mpsc;
use tracing::debug;

use super::coordinator::InvalidationHandle;
use crate::http::NetworkError;

/// The state of a mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MutationState<R> {
  Idle,
  Pending,
  Success(R),
  Error(NetworkError),
}

/// One async write (create, delete, ...) with its own state.
///
/// Handles registered with [`bind`](Mutation::bind) are signalled as soon as
/// the write succeeds, so the bound coordinators mark their cache stale and
/// refetch the active page on their next poll.
#[derive(Debug)]
pub struct Mutation<R> {
  state: MutationState<R>,
  receiver: Option<mpsc::UnboundedReceiver<Result<R, NetworkError>>>,
  invalidates: Vec<InvalidationHandle>,
}

impl<R> Default for Mutation<R> {
  fn default() -> Self {
    Self {
      state: MutationState::Idle,
      receiver: None,
      invalidates: Vec::new(),
    }
  }
}

impl<R: Send + 'static> Mutation<R> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Invalidate the coordinator behind `handle` whenever this mutation succeeds.
  pub fn bind(mut self, handle: InvalidationHandle) -> Self {
    self.invalidates.push(handle);
    self
  }

  pub fn state(&self) -> &MutationState<R> {
    &self.state
  }

  pub fn is_pending(&self) -> bool {
    matches!(self.state, MutationState::Pending)
  }

  pub fn error(&self) -> Option<&NetworkError> {
    match &self.state {
      MutationState::Error(e) => Some(e),
      _ => None,
    }
  }

  /// Run `future` unless a previous run is still pending.
  ///
  /// Returns false when the call was ignored.
  pub fn start<F>(&mut self, future: F) -> bool
  where
    F: Future<Output = Result<R, NetworkError>> + Send + 'static,
  {
    if self.is_pending() {
      return false;
    }

    let (tx, rx) = mpsc::unbounded_channel();
    self.receiver = Some(rx);
    self.state = MutationState::Pending;

    let invalidates = self.invalidates.clone();
    tokio::spawn(async move {
      let result = future.await;
      if result.is_ok() {
        debug!(handles = invalidates.len(), "mutation succeeded, invalidating");
        for handle in &invalidates {
          handle.invalidate();
        }
      }
      let _ = tx.send(result);
    });
    true
  }

  /// Poll for the result of a pending run.
  ///
  /// Returns `true` if the state changed.
  pub fn poll(&mut self) -> bool {
    let receiver = match &mut self.receiver {
      Some(rx) => rx,
      None => return false,
    };

    match receiver.try_recv() {
      Ok(Ok(value)) => {
        self.state = MutationState::Success(value);
        self.receiver = None;
        true
      }
      Ok(Err(error)) => {
        self.state = MutationState::Error(error);
        self.receiver = None;
        true
      }
      Err(mpsc::error::TryRecvError::Empty) => false,
      Err(mpsc::error::TryRecvError::Disconnected) => {
        self.state = MutationState::Error(NetworkError::new("Request was cancelled"));
        self.receiver = None;
        true
      }
    }
  }

  /// Take a successful value, resetting the mutation to idle.
  pub fn take_success(&mut self) -> Option<R> {
    match std::mem::replace(&mut self.state, MutationState::Idle) {
      MutationState::Success(value) => Some(value),
      other => {
        self.state = other;
        None
      }
    }
  }

  /// Forget a finished result.
  pub fn reset(&mut self) {
    if !self.is_pending() {
      self.state = MutationState::Idle;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  #[tokio::test]
  async fn test_mutation_success() {
    let mut mutation = Mutation::new();
    assert!(mutation.start(async { Ok::<_, NetworkError>("42".to_string()) }));
    assert!(mutation.is_pending());

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(mutation.poll());
    assert_eq!(mutation.take_success(), Some("42".to_string()));
    assert_eq!(mutation.state(), &MutationState::Idle);
  }

  #[tokio::test]
  async fn test_mutation_error() {
    let mut mutation: Mutation<()> = Mutation::new();
    mutation.start(async { Err(NetworkError::new("Failed to delete note")) });

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(mutation.poll());
    assert_eq!(
      mutation.error().map(|e| e.to_string()),
      Some("Failed to delete note".to_string())
    );
    assert_eq!(mutation.take_success(), None);
    assert!(mutation.error().is_some());
  }

  #[tokio::test(start_paused = true)]
  async fn test_start_while_pending_is_ignored() {
    let mut mutation = Mutation::new();
    assert!(mutation.start(async {
      tokio::time::sleep(Duration::from_millis(100)).await;
      Ok::<_, NetworkError>(1)
    }));
    assert!(!mutation.start(async { Ok::<_, NetworkError>(2) }));

    tokio::time::sleep(Duration::from_millis(150)).await;
    mutation.poll();
    assert_eq!(mutation.take_success(), Some(1));
  }
}
