use crate::domain::models::TodoTask;
use crate::domain::ports::errors::TodoSinkError;

/// Append-only access to an agent's to-do list.
///
/// Deliberately synchronous: the scheduler tick runs on the hot path of
/// every model request and must not suspend mid-decision. Implementations
/// backed by channels or shared state should make `append` a cheap,
/// non-blocking enqueue.
pub trait TodoSink {
    /// Append tasks in order to the end of the list.
    fn append(&mut self, tasks: Vec<TodoTask>) -> Result<(), TodoSinkError>;
}
