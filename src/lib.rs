//! Reforge - Agent Performance Evaluation and Prompt Refinement
//!
//! Reforge decides, on every agent model-request tick, whether to inject
//! evaluation work into the agent's to-do list; scores agent performance
//! against weighted criteria; decides when prompt refinement should run;
//! synthesizes improved prompts; and persists them as versioned overrides
//! with exactly-one-active semantics.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure data models and collaborator ports
//! - **Service Layer** (`services`): The evaluation and refinement core
//! - **Adapter Layer** (`adapters`): SQLite, HTTP, and in-memory port
//!   implementations
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//!   bootstrap
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use reforge::adapters::sqlite::{initialize_database, SqliteOverrideRepository};
//! use reforge::services::{EvaluationScheduler, PromptResolver};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = initialize_database("sqlite:.reforge/reforge.db").await?;
//!     let overrides = Arc::new(SqliteOverrideRepository::new(pool));
//!     let resolver = PromptResolver::new(overrides);
//!     let prompt = resolver.resolve_system_prompt("research_agent", "default").await?;
//!     // Bind `prompt` when constructing the agent...
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AgentMessage, Config, ConversationSnapshot, Criterion, DatabaseConfig, EvaluationResult,
    EvaluatorConfig, LoggingConfig, OverrideDraft, PromptOverride, RefinerConfig, SchedulerConfig,
    TodoPriority, TodoStatus, TodoTask,
};
pub use domain::ports::{
    MetricsError, MetricsSource, OverrideRepository, PersistenceError, ResearchError,
    ResearchSource, TodoSink, TodoSinkError,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    EvaluationScheduler, ImprovementTag, PerformanceEvaluator, PromptRefiner, PromptResolver,
    RefinementTrigger, SchedulerState, TickOutcome,
};
