pub mod config;
pub mod conversation;
pub mod evaluation;
pub mod prompt_override;
pub mod research;
pub mod todo;

pub use config::{
    Config, DatabaseConfig, EvaluatorConfig, LoggingConfig, MetricsApiConfig, RefinerConfig,
    SchedulerConfig,
};
pub use conversation::{AgentMessage, ConversationSnapshot, MessageRole};
pub use evaluation::{
    ActionKind, ActionPriority, Criterion, CriterionEvaluation, CriterionStatus, EvaluationResult,
    ExpectedImpact, RecommendedAction,
};
pub use prompt_override::{OverrideDraft, PromptOverride, PromptType, ValidationError};
pub use research::{Applicability, ResearchFinding, ResearchFindings};
pub use todo::{TodoPriority, TodoStatus, TodoTask};
