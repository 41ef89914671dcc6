use async_trait::async_trait;

use crate::domain::models::ResearchFindings;
use crate::domain::ports::errors::ResearchError;

/// Source of best-practice research findings for prompt refinement.
#[async_trait]
pub trait ResearchSource: Send + Sync {
    /// Gather findings for the given focus areas (e.g. `prompt_engineering`).
    async fn search(&self, focus_areas: &[String]) -> Result<ResearchFindings, ResearchError>;
}
