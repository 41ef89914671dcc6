//! Research findings consumed upstream of the prompt refiner.

use serde::{Deserialize, Serialize};

/// How directly a finding applies to the agent being refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    Low,
    Medium,
    High,
}

/// One best-practice finding from a research pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchFinding {
    /// Focus area the finding belongs to, e.g. `prompt_engineering`.
    pub area: String,
    /// The finding itself.
    pub finding: String,
    /// Where it came from.
    pub source: String,
    pub applicability: Applicability,
    /// How to act on it.
    pub implementation: String,
}

/// Aggregated output of a research pass over one or more focus areas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchFindings {
    pub focus_areas: Vec<String>,
    pub findings: Vec<ResearchFinding>,
}

impl ResearchFindings {
    /// An empty findings set, for callers refining without research input.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}
