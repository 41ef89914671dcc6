//! Fan-out from an evaluation result to improvement to-dos.
//!
//! When an evaluation flags improvement, each priority area and each
//! high-priority recommended action becomes a `system_improvement` task,
//! followed by the standing periodic-evaluation task. The caller feeds the
//! result to any [`TodoSink`](crate::domain::ports::TodoSink).

use crate::domain::models::evaluation::ActionPriority;
use crate::domain::models::{EvaluationResult, TodoTask};

/// Derive to-do tasks from an evaluation result.
///
/// Improvement tasks are produced only when the result needs improvement;
/// the trailing periodic-evaluation task is always present.
pub fn improvement_tasks(result: &EvaluationResult) -> Vec<TodoTask> {
    let mut tasks = Vec::new();

    if result.improvement_needed {
        for area in &result.priority_areas {
            tasks.push(TodoTask::improvement(format!(
                "Improve {} based on performance evaluation",
                area.as_str()
            )));
        }

        for action in &result.recommended_actions {
            if action.priority == ActionPriority::High {
                tasks.push(TodoTask::improvement(action.description.clone()));
            }
        }
    }

    tasks.push(TodoTask::evaluation(
        "Conduct periodic system performance evaluation",
    ));

    tasks
}
