//! Performance evaluation domain model.
//!
//! An [`EvaluationResult`] is the transient output of scoring one agent over
//! a time window: per-criterion scores against thresholds, a weighted overall
//! score, and the recommended follow-up actions. Nothing here is persisted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, independently-scored dimension of agent performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    SuccessRate,
    ResponseQuality,
    Efficiency,
    ErrorHandling,
}

impl Criterion {
    /// The default criterion set used when a caller specifies none.
    pub fn default_set() -> Vec<Self> {
        vec![
            Self::SuccessRate,
            Self::ResponseQuality,
            Self::Efficiency,
            Self::ErrorHandling,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuccessRate => "success_rate",
            Self::ResponseQuality => "response_quality",
            Self::Efficiency => "efficiency",
            Self::ErrorHandling => "error_handling",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "success_rate" => Some(Self::SuccessRate),
            "response_quality" => Some(Self::ResponseQuality),
            "efficiency" => Some(Self::Efficiency),
            "error_handling" => Some(Self::ErrorHandling),
            _ => None,
        }
    }

    /// Score floor below which this criterion needs improvement.
    pub fn default_threshold(&self) -> f64 {
        match self {
            Self::SuccessRate => 0.90,
            Self::ResponseQuality => 0.85,
            Self::Efficiency => 0.80,
            Self::ErrorHandling => 0.85,
        }
    }

    /// Recommendation text attached when the criterion is below threshold.
    pub fn improvement_hint(&self) -> &'static str {
        match self {
            Self::SuccessRate => "Increase task completion reliability",
            Self::ResponseQuality => "Raise answer quality and structure",
            Self::Efficiency => "Optimize response generation",
            Self::ErrorHandling => "Improve error recovery mechanisms",
        }
    }
}

/// Pass/fail status of a single criterion against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionStatus {
    Good,
    NeedsImprovement,
}

/// One criterion's scored outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionEvaluation {
    pub criterion: Criterion,
    /// Measured score in [0, 1].
    pub score: f64,
    /// Threshold the score was compared against.
    pub threshold: f64,
    pub status: CriterionStatus,
    /// Human-readable follow-up for this criterion.
    pub recommendation: String,
}

impl CriterionEvaluation {
    /// Shortfall below the threshold (0.0 when at or above it).
    pub fn shortfall(&self) -> f64 {
        (self.threshold - self.score).max(0.0)
    }
}

/// Follow-up action kinds the evaluator can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SystemPromptRefinement,
    ToolOptimization,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemPromptRefinement => "system_prompt_refinement",
            Self::ToolOptimization => "tool_optimization",
        }
    }
}

/// Relative priority of a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPriority {
    Low,
    Medium,
    High,
}

/// Expected impact of a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedImpact {
    Low,
    Medium,
    High,
}

/// A concrete follow-up the evaluator recommends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub action: ActionKind,
    pub priority: ActionPriority,
    pub description: String,
    pub expected_impact: ExpectedImpact,
}

/// Result of evaluating one agent over a time window.
///
/// Invariants: `overall_score` lies in [0, 1]; `improvement_needed` is true
/// iff the overall score is below the configured performance threshold or any
/// criterion status is `NeedsImprovement`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Identifier for this evaluation run.
    pub id: Uuid,
    pub agent_name: String,
    pub evaluated_at: DateTime<Utc>,
    pub time_window_hours: f64,
    /// Raw metric measurements the scores were derived from.
    pub metrics: HashMap<String, f64>,
    /// Per-criterion outcomes, in the order the criteria were requested.
    pub criteria_evaluation: Vec<CriterionEvaluation>,
    /// Weighted aggregate score in [0, 1].
    pub overall_score: f64,
    pub improvement_needed: bool,
    /// Criteria below threshold, worst shortfall first.
    pub priority_areas: Vec<Criterion>,
    pub recommended_actions: Vec<RecommendedAction>,
}

impl EvaluationResult {
    /// Look up one criterion's outcome.
    pub fn criterion(&self, criterion: Criterion) -> Option<&CriterionEvaluation> {
        self.criteria_evaluation
            .iter()
            .find(|c| c.criterion == criterion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_is_the_four_standard_criteria() {
        let set = Criterion::default_set();
        assert_eq!(set.len(), 4);
        assert_eq!(set[0], Criterion::SuccessRate);
        assert_eq!(set[3], Criterion::ErrorHandling);
    }

    #[test]
    fn criterion_name_round_trips() {
        for c in Criterion::default_set() {
            assert_eq!(Criterion::from_str(c.as_str()), Some(c));
        }
        assert_eq!(Criterion::from_str("latency"), None);
    }

    #[test]
    fn shortfall_is_zero_at_or_above_threshold() {
        let eval = CriterionEvaluation {
            criterion: Criterion::Efficiency,
            score: 0.85,
            threshold: 0.80,
            status: CriterionStatus::Good,
            recommendation: "Maintain current performance".to_string(),
        };
        assert_eq!(eval.shortfall(), 0.0);
    }

    #[test]
    fn shortfall_measures_distance_below_threshold() {
        let eval = CriterionEvaluation {
            criterion: Criterion::Efficiency,
            score: 0.70,
            threshold: 0.80,
            status: CriterionStatus::NeedsImprovement,
            recommendation: Criterion::Efficiency.improvement_hint().to_string(),
        };
        assert!((eval.shortfall() - 0.10).abs() < 1e-9);
    }
}
