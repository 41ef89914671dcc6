//! Performance evaluator service.
//!
//! Scores an agent over a time window against a set of weighted criteria.
//! Metric collection is delegated to an injected [`MetricsSource`]; this
//! service is pure compute over the fetched map and mutates nothing.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::models::evaluation::{
    ActionKind, ActionPriority, Criterion, CriterionEvaluation, CriterionStatus, EvaluationResult,
    ExpectedImpact, RecommendedAction,
};
use crate::domain::models::EvaluatorConfig;
use crate::domain::ports::errors::MetricsError;
use crate::domain::ports::MetricsSource;

/// Evaluates agent performance from raw metrics.
pub struct PerformanceEvaluator {
    metrics: Arc<dyn MetricsSource>,
    config: EvaluatorConfig,
    /// Per-criterion weights; criteria absent from the map weigh 1.0.
    weights: HashMap<Criterion, f64>,
}

impl PerformanceEvaluator {
    pub fn new(metrics: Arc<dyn MetricsSource>, config: EvaluatorConfig) -> Self {
        Self {
            metrics,
            config,
            weights: HashMap::new(),
        }
    }

    /// Override the default equal weighting.
    ///
    /// # Panics
    /// Panics if any weight is not strictly positive; a zero or negative
    /// weight would make the aggregate meaningless.
    pub fn with_weights(mut self, weights: HashMap<Criterion, f64>) -> Self {
        assert!(
            weights.values().all(|w| *w > 0.0),
            "criterion weights must be strictly positive"
        );
        self.weights = weights;
        self
    }

    /// Evaluate `agent_name` over the trailing window.
    ///
    /// An empty `criteria` slice selects the default criterion set. The
    /// returned result's `priority_areas` lists below-threshold criteria,
    /// worst shortfall first.
    pub async fn evaluate(
        &self,
        agent_name: &str,
        criteria: &[Criterion],
        time_window_hours: f64,
    ) -> Result<EvaluationResult, MetricsError> {
        let criteria = if criteria.is_empty() {
            Criterion::default_set()
        } else {
            criteria.to_vec()
        };

        let metrics = self.metrics.fetch(agent_name, time_window_hours).await?;
        tracing::debug!(
            agent_name,
            time_window_hours,
            metric_count = metrics.len(),
            "evaluating agent performance"
        );

        let criteria_evaluation: Vec<CriterionEvaluation> = criteria
            .iter()
            .map(|&criterion| score_criterion(criterion, &metrics))
            .collect();

        let overall_score = self.weighted_mean(&criteria_evaluation);

        let mut priority_areas: Vec<&CriterionEvaluation> = criteria_evaluation
            .iter()
            .filter(|c| c.status == CriterionStatus::NeedsImprovement)
            .collect();
        // Worst first; stable, so ties keep request order.
        priority_areas.sort_by(|a, b| {
            b.shortfall()
                .partial_cmp(&a.shortfall())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let priority_areas: Vec<Criterion> =
            priority_areas.into_iter().map(|c| c.criterion).collect();

        let improvement_needed = overall_score < self.config.performance_threshold
            || !priority_areas.is_empty();

        let recommended_actions = recommend_actions(&priority_areas);

        Ok(EvaluationResult {
            id: Uuid::new_v4(),
            agent_name: agent_name.to_string(),
            evaluated_at: Utc::now(),
            time_window_hours,
            metrics,
            criteria_evaluation,
            overall_score,
            improvement_needed,
            priority_areas,
            recommended_actions,
        })
    }

    fn weighted_mean(&self, evaluations: &[CriterionEvaluation]) -> f64 {
        let mut total = 0.0;
        let mut weight_sum = 0.0;
        for eval in evaluations {
            let weight = self.weights.get(&eval.criterion).copied().unwrap_or(1.0);
            total += eval.score * weight;
            weight_sum += weight;
        }
        if weight_sum == 0.0 {
            return 0.0;
        }
        (total / weight_sum).clamp(0.0, 1.0)
    }
}

/// Derive one criterion's score from the raw metric map.
///
/// Falls back to derived forms when the direct metric is absent:
/// success rate from task counts, response quality from user satisfaction,
/// error handling from the complement of the error rate. A criterion with no
/// usable data scores 0.0 and is flagged for improvement.
fn score_criterion(criterion: Criterion, metrics: &HashMap<String, f64>) -> CriterionEvaluation {
    let score = match criterion {
        Criterion::SuccessRate => metrics.get("success_rate").copied().or_else(|| {
            let total = metrics.get("total_tasks").copied()?;
            let successful = metrics.get("successful_tasks").copied()?;
            (total > 0.0).then(|| successful / total)
        }),
        Criterion::ResponseQuality => metrics
            .get("response_quality")
            .or_else(|| metrics.get("user_satisfaction"))
            .copied(),
        Criterion::Efficiency => metrics.get("efficiency").copied(),
        Criterion::ErrorHandling => metrics
            .get("error_handling")
            .copied()
            .or_else(|| metrics.get("error_rate").map(|rate| 1.0 - rate)),
    };

    let threshold = criterion.default_threshold();
    match score {
        Some(score) => {
            let score = score.clamp(0.0, 1.0);
            if score < threshold {
                CriterionEvaluation {
                    criterion,
                    score,
                    threshold,
                    status: CriterionStatus::NeedsImprovement,
                    recommendation: criterion.improvement_hint().to_string(),
                }
            } else {
                CriterionEvaluation {
                    criterion,
                    score,
                    threshold,
                    status: CriterionStatus::Good,
                    recommendation: "Maintain current performance".to_string(),
                }
            }
        }
        None => CriterionEvaluation {
            criterion,
            score: 0.0,
            threshold,
            status: CriterionStatus::NeedsImprovement,
            recommendation: "No metric data available for this window".to_string(),
        },
    }
}

fn recommend_actions(priority_areas: &[Criterion]) -> Vec<RecommendedAction> {
    let mut actions = Vec::new();

    if !priority_areas.is_empty() {
        let areas = priority_areas
            .iter()
            .map(Criterion::as_str)
            .collect::<Vec<_>>()
            .join(" and ");
        actions.push(RecommendedAction {
            action: ActionKind::SystemPromptRefinement,
            priority: ActionPriority::High,
            description: format!("Refine system prompt to improve {areas}"),
            expected_impact: ExpectedImpact::Medium,
        });
    }

    if priority_areas.contains(&Criterion::Efficiency) {
        actions.push(RecommendedAction {
            action: ActionKind::ToolOptimization,
            priority: ActionPriority::Medium,
            description: "Optimize tool usage patterns".to_string(),
            expected_impact: ExpectedImpact::Low,
        });
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::StaticMetrics;

    fn evaluator(pairs: &[(&str, f64)]) -> PerformanceEvaluator {
        PerformanceEvaluator::new(
            Arc::new(StaticMetrics::from_pairs(pairs)),
            EvaluatorConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_all_criteria_above_threshold() {
        let evaluator = evaluator(&[
            ("success_rate", 0.95),
            ("response_quality", 0.9),
            ("efficiency", 0.85),
            ("error_handling", 0.9),
        ]);

        let result = evaluator.evaluate("research_agent", &[], 24.0).await.unwrap();

        assert!(!result.improvement_needed);
        assert!(result.priority_areas.is_empty());
        assert!(result.recommended_actions.is_empty());
        assert!(result.overall_score > 0.8 && result.overall_score <= 1.0);
        assert_eq!(result.criteria_evaluation.len(), 4);
    }

    #[tokio::test]
    async fn test_below_threshold_criteria_become_priority_areas_worst_first() {
        // efficiency shortfall 0.80-0.60=0.20; error_handling 0.85-0.80=0.05
        let evaluator = evaluator(&[
            ("success_rate", 0.95),
            ("response_quality", 0.9),
            ("efficiency", 0.60),
            ("error_handling", 0.80),
        ]);

        let result = evaluator.evaluate("research_agent", &[], 24.0).await.unwrap();

        assert!(result.improvement_needed);
        assert_eq!(
            result.priority_areas,
            vec![Criterion::Efficiency, Criterion::ErrorHandling]
        );
        assert_eq!(result.recommended_actions.len(), 2);
        assert_eq!(
            result.recommended_actions[0].action,
            ActionKind::SystemPromptRefinement
        );
        assert_eq!(
            result.recommended_actions[1].action,
            ActionKind::ToolOptimization
        );
    }

    #[tokio::test]
    async fn test_success_rate_derived_from_task_counts() {
        let evaluator = evaluator(&[
            ("total_tasks", 45.0),
            ("successful_tasks", 42.0),
            ("response_quality", 0.9),
            ("efficiency", 0.85),
            ("error_handling", 0.9),
        ]);

        let result = evaluator.evaluate("research_agent", &[], 24.0).await.unwrap();
        let success = result.criterion(Criterion::SuccessRate).unwrap();
        assert!((success.score - 42.0 / 45.0).abs() < 1e-9);
        assert_eq!(success.status, CriterionStatus::Good);
    }

    #[tokio::test]
    async fn test_error_handling_derived_from_error_rate() {
        let evaluator = evaluator(&[("error_rate", 0.067)]);
        let result = evaluator
            .evaluate("research_agent", &[Criterion::ErrorHandling], 24.0)
            .await
            .unwrap();

        let eval = result.criterion(Criterion::ErrorHandling).unwrap();
        assert!((eval.score - 0.933).abs() < 1e-9);
        assert_eq!(eval.status, CriterionStatus::Good);
    }

    #[tokio::test]
    async fn test_missing_metric_scores_zero_and_flags_improvement() {
        let evaluator = evaluator(&[("success_rate", 0.95)]);
        let result = evaluator
            .evaluate("research_agent", &[Criterion::Efficiency], 24.0)
            .await
            .unwrap();

        let eval = result.criterion(Criterion::Efficiency).unwrap();
        assert_eq!(eval.score, 0.0);
        assert_eq!(eval.status, CriterionStatus::NeedsImprovement);
        assert!(result.improvement_needed);
    }

    #[tokio::test]
    async fn test_overall_score_is_mean_of_criterion_scores() {
        let evaluator = evaluator(&[
            ("success_rate", 1.0),
            ("response_quality", 0.9),
            ("efficiency", 0.8),
            ("error_handling", 0.9),
        ]);

        let result = evaluator.evaluate("research_agent", &[], 24.0).await.unwrap();
        assert!((result.overall_score - 0.9).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_weights_shift_the_aggregate() {
        let metrics = StaticMetrics::from_pairs(&[("success_rate", 1.0), ("efficiency", 0.5)]);
        let mut weights = HashMap::new();
        weights.insert(Criterion::SuccessRate, 3.0);
        weights.insert(Criterion::Efficiency, 1.0);

        let evaluator =
            PerformanceEvaluator::new(Arc::new(metrics), EvaluatorConfig::default())
                .with_weights(weights);

        let result = evaluator
            .evaluate(
                "research_agent",
                &[Criterion::SuccessRate, Criterion::Efficiency],
                24.0,
            )
            .await
            .unwrap();

        // (1.0*3 + 0.5*1) / 4 = 0.875
        assert!((result.overall_score - 0.875).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_improvement_needed_when_overall_below_threshold() {
        let evaluator = evaluator(&[("success_rate", 0.75)]);
        let result = evaluator
            .evaluate("research_agent", &[Criterion::SuccessRate], 24.0)
            .await
            .unwrap();

        assert!((result.overall_score - 0.75).abs() < 1e-9);
        assert!(result.improvement_needed);
    }
}
