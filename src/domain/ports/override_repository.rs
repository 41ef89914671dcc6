use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::models::{OverrideDraft, PromptOverride};
use crate::domain::ports::errors::PersistenceError;

/// Repository port for versioned prompt override persistence.
///
/// Invariant: at most one active override per `(agent_name, prompt_type)` at
/// any time. Implementations must make the deactivate-then-insert sequence in
/// [`save`](OverrideRepository::save) atomic with respect to concurrent saves
/// for the same key.
#[async_trait]
pub trait OverrideRepository: Send + Sync {
    /// Validate and persist a new override, deactivating any existing active
    /// row for the draft's `(agent_name, prompt_type)` first.
    ///
    /// Returns the new row's identifier.
    async fn save(&self, draft: &OverrideDraft) -> Result<i64, PersistenceError>;

    /// The single active override for an agent, if any.
    async fn get_active(&self, agent_name: &str) -> Result<Option<PromptOverride>, PersistenceError>;

    /// Full override history, newest first, inactive rows included.
    async fn list_all(&self) -> Result<Vec<PromptOverride>, PersistenceError>;

    /// Deactivate the currently active override for an agent.
    ///
    /// Returns `false` (not an error) when no override was active.
    async fn remove(&self, agent_name: &str) -> Result<bool, PersistenceError>;

    /// Creation time of the most recent override for an agent, active or not.
    ///
    /// Every row was active at creation, so this is the time of the last
    /// refinement — the elapsed-time input to the refinement trigger.
    async fn latest_created_at(
        &self,
        agent_name: &str,
    ) -> Result<Option<DateTime<Utc>>, PersistenceError>;
}
