//! To-do task domain model.
//!
//! The scheduler and the improvement-task fan-out only ever append to an
//! agent's to-do list; marking tasks done is the agent's own planning loop's
//! job.

use serde::{Deserialize, Serialize};

/// Category tag for tasks the evaluation subsystem injects.
pub const CATEGORY_EVALUATION: &str = "evaluation";
/// Category tag for improvement tasks derived from an evaluation result.
pub const CATEGORY_SYSTEM_IMPROVEMENT: &str = "system_improvement";

/// Status of a to-do task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Pending,
    InProgress,
    Done,
}

impl Default for TodoStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

/// Priority of a to-do task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoPriority {
    Low,
    Medium,
    High,
}

impl Default for TodoPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl TodoPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One entry on an agent's to-do list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoTask {
    pub content: String,
    #[serde(default)]
    pub status: TodoStatus,
    #[serde(default)]
    pub priority: TodoPriority,
    /// Free-form tag, e.g. `evaluation` or `system_improvement`.
    pub category: String,
}

impl TodoTask {
    /// Build a pending task with the given priority and category.
    pub fn new(
        content: impl Into<String>,
        priority: TodoPriority,
        category: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            status: TodoStatus::Pending,
            priority,
            category: category.into(),
        }
    }

    /// A pending evaluation-category task.
    pub fn evaluation(content: impl Into<String>) -> Self {
        Self::new(content, TodoPriority::Medium, CATEGORY_EVALUATION)
    }

    /// A pending high-priority improvement task.
    pub fn improvement(content: impl Into<String>) -> Self {
        Self::new(content, TodoPriority::High, CATEGORY_SYSTEM_IMPROVEMENT)
    }

    /// Whether the task was injected by the evaluation subsystem itself.
    pub fn is_evaluation_task(&self) -> bool {
        self.category == CATEGORY_EVALUATION
    }
}
