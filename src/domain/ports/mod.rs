//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the collaborator interfaces that infrastructure
//! adapters must implement:
//! - `OverrideRepository`: durable, versioned prompt override storage
//! - `MetricsSource`: raw performance metrics for an agent and window
//! - `ResearchSource`: best-practice findings feeding the refiner
//! - `TodoSink`: append-only access to an agent's planning list
//!
//! These traits keep the evaluation core independent of any concrete store,
//! transport, or host agent framework.

pub mod errors;
pub mod metrics_source;
pub mod override_repository;
pub mod research_source;
pub mod todo_sink;

pub use errors::{MetricsError, PersistenceError, ResearchError, TodoSinkError};
pub use metrics_source::MetricsSource;
pub use override_repository::OverrideRepository;
pub use research_source::ResearchSource;
pub use todo_sink::TodoSink;
