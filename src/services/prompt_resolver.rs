//! Prompt resolution for agent construction.
//!
//! Binds the system prompt for a named agent: a validated active override
//! supersedes the hardcoded default. A missing override is the normal case,
//! never an error.

use std::sync::Arc;

use crate::domain::ports::errors::PersistenceError;
use crate::domain::ports::OverrideRepository;

/// Resolves which prompt text an agent should be constructed with.
pub struct PromptResolver {
    overrides: Arc<dyn OverrideRepository>,
}

impl PromptResolver {
    pub fn new(overrides: Arc<dyn OverrideRepository>) -> Self {
        Self { overrides }
    }

    /// The active override's prompt for `agent_name`, or `default_prompt`.
    pub async fn resolve_system_prompt(
        &self,
        agent_name: &str,
        default_prompt: &str,
    ) -> Result<String, PersistenceError> {
        match self.overrides.get_active(agent_name).await? {
            Some(active) => {
                tracing::debug!(
                    agent_name,
                    override_id = active.id,
                    confidence = active.confidence_score,
                    "using prompt override"
                );
                Ok(active.improved_prompt)
            }
            None => Ok(default_prompt.to_string()),
        }
    }
}
