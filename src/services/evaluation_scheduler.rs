//! Evaluation scheduler middleware.
//!
//! Runs once per agent model-request tick. The gate fires either on the
//! periodic interval or immediately, when the recent conversation or to-do
//! list shows error/improvement signals; firing injects evaluation tasks
//! into the agent's to-do list. The tick never blocks and never raises:
//! append failures degrade the tick and the original request proceeds
//! unmodified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{ConversationSnapshot, SchedulerConfig, TodoTask};
use crate::domain::ports::TodoSink;

/// Case-insensitive markers scanned for in recent message content.
const ERROR_KEYWORDS: [&str; 5] = ["error", "failed", "exception", "timeout", "unable to"];

/// Case-insensitive markers scanned for in agent-authored to-do content.
const SYSTEM_ISSUE_KEYWORDS: [&str; 3] = ["system", "improve", "refine"];

/// How many trailing messages the error scan covers.
const RECENT_MESSAGE_WINDOW: usize = 10;

/// Messages containing an error keyword needed to trigger immediately.
const ERROR_MESSAGE_THRESHOLD: usize = 3;

/// System-issue to-dos needed to trigger immediately.
const SYSTEM_TODO_THRESHOLD: usize = 2;

/// Mutable scheduler state, one instance per configured middleware.
///
/// Constructor-injected rather than global so tests and multi-agent hosts
/// can run independent schedules. Not meant for concurrent sharing; a host
/// that shares one cadence across agent instances must add its own
/// synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerState {
    /// When the gate last fired, `None` until the first trigger.
    pub last_evaluation_time: Option<DateTime<Utc>>,
    /// Monotonic count of gate firings.
    pub evaluation_count: u64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            last_evaluation_time: None,
            evaluation_count: 0,
        }
    }
}

/// Result of one scheduler tick.
///
/// An explicit outcome instead of swallowed exceptions, so callers and tests
/// can assert fail-open behavior without reading logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The gate did not fire; nothing was injected.
    Idle,
    /// The gate fired and evaluation tasks were appended.
    Triggered {
        /// Number of tasks injected.
        tasks_added: usize,
        /// True when error/improvement signals fired the gate ahead of the
        /// periodic interval.
        immediate: bool,
    },
    /// The gate fired but the sink rejected the append; the request
    /// proceeds unmodified.
    Degraded { reason: String },
}

/// Per-tick evaluation gate.
pub struct EvaluationScheduler {
    config: SchedulerConfig,
    state: SchedulerState,
}

impl EvaluationScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_state(config, SchedulerState::default())
    }

    /// Resume from previously captured state.
    pub fn with_state(config: SchedulerConfig, state: SchedulerState) -> Self {
        Self { config, state }
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run the gate for one model-request tick.
    pub fn tick(&mut self, snapshot: &ConversationSnapshot, todos: &mut dyn TodoSink) -> TickOutcome {
        self.tick_at(Utc::now(), snapshot, todos)
    }

    /// [`tick`](Self::tick) with an explicit clock, for tests.
    pub fn tick_at(
        &mut self,
        now: DateTime<Utc>,
        snapshot: &ConversationSnapshot,
        todos: &mut dyn TodoSink,
    ) -> TickOutcome {
        let interval_elapsed = match self.state.last_evaluation_time {
            Some(last) => {
                let hours_since_last = (now - last).num_seconds() as f64 / 3600.0;
                hours_since_last >= self.config.evaluation_interval_hours
            }
            // Never evaluated: the first tick fires the periodic path.
            None => true,
        };

        let immediate = self.should_trigger_immediate(snapshot);

        if !(interval_elapsed || immediate) {
            return TickOutcome::Idle;
        }

        let tasks = self.evaluation_tasks();
        let tasks_added = tasks.len();
        let append_result = todos.append(tasks);

        // State advances whether or not the append landed; a broken sink
        // must not turn every subsequent tick into a trigger storm.
        self.state.last_evaluation_time = Some(now);
        self.state.evaluation_count += 1;

        match append_result {
            Ok(()) => {
                tracing::info!(
                    evaluation_count = self.state.evaluation_count,
                    tasks_added,
                    immediate,
                    "evaluation tasks injected"
                );
                TickOutcome::Triggered {
                    tasks_added,
                    immediate,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "todo append failed; proceeding unmodified");
                TickOutcome::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Error/improvement signal scan over the snapshot.
    fn should_trigger_immediate(&self, snapshot: &ConversationSnapshot) -> bool {
        let recent_errors = snapshot
            .recent_messages(RECENT_MESSAGE_WINDOW)
            .iter()
            .filter(|m| {
                let content = m.content.to_lowercase();
                ERROR_KEYWORDS.iter().any(|kw| content.contains(kw))
            })
            .count();

        if recent_errors >= ERROR_MESSAGE_THRESHOLD {
            return true;
        }

        // Skip evaluation-category tasks: those are the scheduler's own
        // injections, and matching them would re-trigger on every tick.
        let system_issue_todos = snapshot
            .todos
            .iter()
            .filter(|t| !t.is_evaluation_task())
            .filter(|t| {
                let content = t.content.to_lowercase();
                SYSTEM_ISSUE_KEYWORDS.iter().any(|kw| content.contains(kw))
            })
            .count();

        system_issue_todos >= SYSTEM_TODO_THRESHOLD
    }

    /// The fixed task set injected on trigger.
    fn evaluation_tasks(&self) -> Vec<TodoTask> {
        let mut tasks = vec![
            TodoTask::evaluation("Conduct periodic system performance evaluation"),
            TodoTask::evaluation("Monitor system health and performance metrics"),
        ];
        if self.config.auto_trigger_refinement {
            tasks.push(TodoTask::evaluation(
                "Check if system refinement is needed",
            ));
        }
        tasks
    }
}
