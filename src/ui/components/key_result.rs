/// Outcome of offering a key event to a component.
///
/// Components return this to their parent view, which either stops (key
/// consumed), acts on the event, or tries the next handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult<T> {
  /// Key was consumed, no event for parent to handle
  Handled,
  /// Key was consumed, here's an event for parent to process
  Event(T),
  /// Key was not consumed, parent should try next handler
  NotHandled,
}
