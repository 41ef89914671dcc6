//! Prompt override domain model.
//!
//! An override is a stored replacement system prompt for a named agent.
//! History is append-only: saving a new override deactivates the previous
//! active row, and removal flips the active flag without erasing rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which prompt slot an override replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptType {
    /// The agent's system prompt.
    System,
}

impl Default for PromptType {
    fn default() -> Self {
        Self::System
    }
}

impl PromptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// A persisted, versioned prompt override row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptOverride {
    /// Autoincrement row identifier.
    pub id: i64,
    /// Logical owner of the override.
    pub agent_name: String,
    /// Prompt slot being overridden.
    pub prompt_type: PromptType,
    /// Snapshot of the prompt that was replaced, if captured.
    pub original_prompt: Option<String>,
    /// The replacement prompt text.
    pub improved_prompt: String,
    /// Free-text justification, kept for audit.
    pub change_reason: String,
    /// Confidence in the improvement, 0.0–1.0.
    pub confidence_score: f64,
    /// Whether this row is the current override for its key.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validation failures for override fields, rejected before any store mutation.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("agent_name cannot be empty")]
    EmptyAgentName,

    #[error("improved_prompt cannot be empty")]
    EmptyPrompt,

    #[error("confidence_score {0} outside [0.0, 1.0]")]
    ConfidenceOutOfRange(f64),
}

/// Fields for a new override, prior to persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideDraft {
    pub agent_name: String,
    #[serde(default)]
    pub prompt_type: PromptType,
    pub original_prompt: Option<String>,
    pub improved_prompt: String,
    pub change_reason: String,
    pub confidence_score: f64,
}

impl OverrideDraft {
    /// Build a draft for an agent's system prompt.
    pub fn new(
        agent_name: impl Into<String>,
        improved_prompt: impl Into<String>,
        change_reason: impl Into<String>,
        confidence_score: f64,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            prompt_type: PromptType::System,
            original_prompt: None,
            improved_prompt: improved_prompt.into(),
            change_reason: change_reason.into(),
            confidence_score,
        }
    }

    /// Attach a snapshot of the prompt being replaced.
    pub fn with_original_prompt(mut self, original: impl Into<String>) -> Self {
        self.original_prompt = Some(original.into());
        self
    }

    /// Check the draft's fields against the override contract.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.agent_name.trim().is_empty() {
            return Err(ValidationError::EmptyAgentName);
        }
        if self.improved_prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        if !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(ValidationError::ConfidenceOutOfRange(self.confidence_score));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_draft_passes() {
        let draft = OverrideDraft::new("research_agent", "You are precise.", "tightening", 0.9);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn empty_agent_name_rejected() {
        let draft = OverrideDraft::new("  ", "prompt", "reason", 0.5);
        assert_eq!(draft.validate(), Err(ValidationError::EmptyAgentName));
    }

    #[test]
    fn empty_prompt_rejected() {
        let draft = OverrideDraft::new("agent", "", "reason", 0.5);
        assert_eq!(draft.validate(), Err(ValidationError::EmptyPrompt));
    }

    #[test]
    fn confidence_out_of_range_rejected() {
        let draft = OverrideDraft::new("agent", "prompt", "reason", 1.2);
        assert_eq!(
            draft.validate(),
            Err(ValidationError::ConfidenceOutOfRange(1.2))
        );
        let draft = OverrideDraft::new("agent", "prompt", "reason", -0.1);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn prompt_type_round_trips() {
        assert_eq!(PromptType::from_str("system"), Some(PromptType::System));
        assert_eq!(PromptType::from_str("SYSTEM"), Some(PromptType::System));
        assert_eq!(PromptType::from_str("user"), None);
        assert_eq!(PromptType::System.as_str(), "system");
    }
}
