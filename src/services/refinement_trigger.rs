//! Refinement trigger service.
//!
//! Decides whether prompt refinement should run now, from the agent's
//! current overall score and the time elapsed since its last refinement.
//! The elapsed time comes from the override store's history — the creation
//! time of the most recent override — never from scheduler-local state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::errors::PersistenceError;
use crate::domain::ports::OverrideRepository;

/// Outcome of a trigger check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerDecision {
    pub should_trigger: bool,
    /// One human-readable reason per satisfied condition; empty when the
    /// decision is negative.
    pub reasons: Vec<String>,
    pub overall_score: f64,
    /// Hours since the last refinement, `None` when no override exists.
    pub hours_since_last_refinement: Option<f64>,
}

/// Decides when refinement should run.
pub struct RefinementTrigger {
    overrides: Arc<dyn OverrideRepository>,
}

impl RefinementTrigger {
    pub fn new(overrides: Arc<dyn OverrideRepository>) -> Self {
        Self { overrides }
    }

    /// Check both trigger conditions; either alone is sufficient.
    ///
    /// 1. `overall_score < performance_threshold`.
    /// 2. Hours since the most recent override for this agent ≥
    ///    `min_hours_since_last_refinement`. With no prior override the
    ///    elapsed time is unbounded and the condition holds trivially.
    pub async fn should_trigger(
        &self,
        agent_name: &str,
        overall_score: f64,
        performance_threshold: f64,
        min_hours_since_last_refinement: f64,
    ) -> Result<TriggerDecision, PersistenceError> {
        self.should_trigger_at(
            Utc::now(),
            agent_name,
            overall_score,
            performance_threshold,
            min_hours_since_last_refinement,
        )
        .await
    }

    /// Same as [`should_trigger`](Self::should_trigger) with an explicit
    /// clock, for tests.
    pub async fn should_trigger_at(
        &self,
        now: DateTime<Utc>,
        agent_name: &str,
        overall_score: f64,
        performance_threshold: f64,
        min_hours_since_last_refinement: f64,
    ) -> Result<TriggerDecision, PersistenceError> {
        let mut reasons = Vec::new();

        if overall_score < performance_threshold {
            reasons.push(format!(
                "Performance score {overall_score:.2} below threshold {performance_threshold:.2}"
            ));
        }

        let last_refinement = self.overrides.latest_created_at(agent_name).await?;
        let hours_since_last = last_refinement
            .map(|created| (now - created).num_seconds() as f64 / 3600.0);

        match hours_since_last {
            Some(hours) if hours >= min_hours_since_last_refinement => {
                reasons.push(format!(
                    "{hours:.1}h since last refinement (minimum {min_hours_since_last_refinement:.1}h)"
                ));
            }
            Some(_) => {}
            None => {
                reasons.push(format!(
                    "No previous refinement recorded for '{agent_name}'"
                ));
            }
        }

        let should_trigger = !reasons.is_empty();
        if should_trigger {
            tracing::info!(agent_name, overall_score, ?reasons, "refinement triggered");
        }

        Ok(TriggerDecision {
            should_trigger,
            reasons,
            overall_score,
            hours_since_last_refinement: hours_since_last,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteOverrideRepository};
    use crate::domain::models::OverrideDraft;

    async fn trigger_with_repo() -> (RefinementTrigger, Arc<SqliteOverrideRepository>) {
        let pool = create_migrated_test_pool().await.unwrap();
        let repo = Arc::new(SqliteOverrideRepository::new(pool));
        (RefinementTrigger::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_no_prior_override_triggers_regardless_of_score() {
        let (trigger, _repo) = trigger_with_repo().await;

        let decision = trigger
            .should_trigger("research_agent", 0.95, 0.8, 24.0)
            .await
            .unwrap();

        assert!(decision.should_trigger);
        assert_eq!(decision.reasons.len(), 1);
        assert!(decision.reasons[0].contains("No previous refinement"));
        assert!(decision.hours_since_last_refinement.is_none());
    }

    #[tokio::test]
    async fn test_low_score_triggers_with_score_reason() {
        let (trigger, repo) = trigger_with_repo().await;
        repo.save(&OverrideDraft::new("research_agent", "P", "r", 0.9))
            .await
            .unwrap();

        let decision = trigger
            .should_trigger("research_agent", 0.75, 0.8, 24.0)
            .await
            .unwrap();

        assert!(decision.should_trigger);
        assert_eq!(decision.reasons.len(), 1);
        assert!(decision.reasons[0].contains("below threshold"));
    }

    #[tokio::test]
    async fn test_good_score_and_recent_refinement_does_not_trigger() {
        let (trigger, repo) = trigger_with_repo().await;
        repo.save(&OverrideDraft::new("research_agent", "P", "r", 0.9))
            .await
            .unwrap();

        let decision = trigger
            .should_trigger("research_agent", 0.95, 0.8, 24.0)
            .await
            .unwrap();

        assert!(!decision.should_trigger);
        assert!(decision.reasons.is_empty());
        assert!(decision.hours_since_last_refinement.unwrap() < 1.0);
    }

    #[tokio::test]
    async fn test_elapsed_time_alone_triggers() {
        let (trigger, repo) = trigger_with_repo().await;
        repo.save(&OverrideDraft::new("research_agent", "P", "r", 0.9))
            .await
            .unwrap();

        // Evaluate "two days later" against a 24h minimum.
        let later = Utc::now() + chrono::Duration::hours(48);
        let decision = trigger
            .should_trigger_at(later, "research_agent", 0.95, 0.8, 24.0)
            .await
            .unwrap();

        assert!(decision.should_trigger);
        assert_eq!(decision.reasons.len(), 1);
        assert!(decision.reasons[0].contains("since last refinement"));
    }

    #[tokio::test]
    async fn test_both_conditions_yield_two_reasons() {
        let (trigger, repo) = trigger_with_repo().await;
        repo.save(&OverrideDraft::new("research_agent", "P", "r", 0.9))
            .await
            .unwrap();

        let later = Utc::now() + chrono::Duration::hours(48);
        let decision = trigger
            .should_trigger_at(later, "research_agent", 0.5, 0.8, 24.0)
            .await
            .unwrap();

        assert!(decision.should_trigger);
        assert_eq!(decision.reasons.len(), 2);
    }

    #[tokio::test]
    async fn test_score_trigger_monotonicity() {
        let (trigger, repo) = trigger_with_repo().await;
        repo.save(&OverrideDraft::new("research_agent", "P", "r", 0.9))
            .await
            .unwrap();

        // Triggering on score alone...
        let decision = trigger
            .should_trigger("research_agent", 0.75, 0.8, 24.0)
            .await
            .unwrap();
        assert!(decision.should_trigger);

        // ...flips off once the threshold drops below the score and the
        // time condition does not hold.
        let decision = trigger
            .should_trigger("research_agent", 0.75, 0.7, 24.0)
            .await
            .unwrap();
        assert!(!decision.should_trigger);
    }
}
