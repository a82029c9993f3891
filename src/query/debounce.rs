//! Timer-based coalescing of a changing value.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delays a value until it has stopped changing for `delay`.
///
/// Each [`push`](Debouncer::push) cancels the pending timer and starts a new
/// one, so only the last value pushed inside the quiet window is delivered.
/// Settled values are picked up with [`poll`](Debouncer::poll) from the event
/// loop tick.
#[derive(Debug)]
pub struct Debouncer<T> {
  delay: Duration,
  pending: Option<JoinHandle<()>>,
  tx: mpsc::UnboundedSender<T>,
  rx: mpsc::UnboundedReceiver<T>,
}

impl<T: Send + 'static> Debouncer<T> {
  pub fn new(delay: Duration) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      delay,
      pending: None,
      tx,
      rx,
    }
  }

  /// Schedule `value`, replacing whatever was pending.
  pub fn push(&mut self, value: T) {
    self.cancel();

    let tx = self.tx.clone();
    let delay = self.delay;
    self.pending = Some(tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      let _ = tx.send(value);
    }));
  }

  /// Drop the pending value, if any.
  pub fn cancel(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.abort();
    }
  }

  pub fn is_pending(&self) -> bool {
    self
      .pending
      .as_ref()
      .is_some_and(|handle| !handle.is_finished())
  }

  /// Take the most recently settled value without blocking.
  pub fn poll(&mut self) -> Option<T> {
    let mut latest = None;
    while let Ok(value) = self.rx.try_recv() {
      latest = Some(value);
    }
    latest
  }
}

impl<T> Drop for Debouncer<T> {
  fn drop(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.abort();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::time::sleep;

  #[tokio::test(start_paused = true)]
  async fn test_only_last_value_fires() {
    let mut debouncer = Debouncer::new(Duration::from_millis(500));

    debouncer.push("b".to_string());
    sleep(Duration::from_millis(200)).await;
    debouncer.push("ba".to_string());
    sleep(Duration::from_millis(200)).await;
    debouncer.push("bat".to_string());

    sleep(Duration::from_millis(400)).await;
    assert_eq!(debouncer.poll(), None);
    assert!(debouncer.is_pending());

    sleep(Duration::from_millis(200)).await;
    assert_eq!(debouncer.poll(), Some("bat".to_string()));
    assert_eq!(debouncer.poll(), None);
  }

  #[tokio::test(start_paused = true)]
  async fn test_cancel_drops_pending_value() {
    let mut debouncer = Debouncer::new(Duration::from_millis(100));
    debouncer.push(1);
    debouncer.cancel();

    sleep(Duration::from_millis(300)).await;
    assert_eq!(debouncer.poll(), None);
    assert!(!debouncer.is_pending());
  }

  #[tokio::test(start_paused = true)]
  async fn test_separate_windows_each_fire() {
    let mut debouncer = Debouncer::new(Duration::from_millis(100));
    debouncer.push(1);
    sleep(Duration::from_millis(150)).await;
    assert_eq!(debouncer.poll(), Some(1));

    debouncer.push(2);
    sleep(Duration::from_millis(150)).await;
    assert_eq!(debouncer.poll(), Some(2));
  }
}
