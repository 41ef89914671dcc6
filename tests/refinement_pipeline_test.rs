//! End-to-end pipeline tests: evaluate → trigger → refine → persist → resolve.

mod helpers {
    pub mod database;
}

use std::sync::Arc;

use reforge::adapters::memory::{StaticMetrics, VecTodoList};
use reforge::adapters::sqlite::SqliteOverrideRepository;
use reforge::domain::ports::OverrideRepository;
use reforge::services::{monitor_health, ImprovementTag, PromptRefiner, RefinementTrigger};
use reforge::{
    AgentMessage, ConversationSnapshot, Criterion, EvaluationScheduler, EvaluatorConfig,
    OverrideDraft, PerformanceEvaluator, PromptResolver, SchedulerConfig, TickOutcome,
};

use helpers::database::{setup_test_db, teardown_test_db};

/// Scenario 1: a 0.75 overall score against a 0.8 threshold flags
/// improvement and produces a score-based trigger reason.
#[tokio::test]
async fn low_score_flows_from_evaluator_into_trigger_decision() {
    let pool = setup_test_db().await;
    let repo = Arc::new(SqliteOverrideRepository::new(pool.clone()));

    // All four criteria at 0.75 → overall 0.75.
    let metrics = StaticMetrics::from_pairs(&[
        ("success_rate", 0.75),
        ("response_quality", 0.75),
        ("efficiency", 0.75),
        ("error_handling", 0.75),
    ]);
    let evaluator = PerformanceEvaluator::new(Arc::new(metrics), EvaluatorConfig::default());
    let result = evaluator.evaluate("research_agent", &[], 24.0).await.unwrap();

    assert!((result.overall_score - 0.75).abs() < 1e-9);
    assert!(result.improvement_needed);

    // Seed a fresh override so only the score condition can fire.
    repo.save(&OverrideDraft::new("research_agent", "SEED", "seed", 0.9))
        .await
        .unwrap();

    let trigger = RefinementTrigger::new(repo.clone());
    let decision = trigger
        .should_trigger("research_agent", result.overall_score, 0.8, 24.0)
        .await
        .unwrap();

    assert!(decision.should_trigger);
    assert!(decision
        .reasons
        .iter()
        .any(|r| r.contains("below threshold")));

    teardown_test_db(pool).await;
}

/// Scenario 2: with no prior override the time condition is trivially true,
/// whatever the score.
#[tokio::test]
async fn missing_history_triggers_regardless_of_score() {
    let pool = setup_test_db().await;
    let repo = Arc::new(SqliteOverrideRepository::new(pool.clone()));

    let trigger = RefinementTrigger::new(repo);
    let decision = trigger
        .should_trigger("research_agent", 0.99, 0.8, 24.0)
        .await
        .unwrap();

    assert!(decision.should_trigger);
    assert!(decision.hours_since_last_refinement.is_none());

    teardown_test_db(pool).await;
}

/// Scenario 4: exactly three error-bearing messages in a ten-message window
/// fire the scheduler ahead of the periodic interval.
#[test]
fn error_burst_fires_scheduler_before_interval() {
    let mut scheduler = EvaluationScheduler::new(SchedulerConfig::default());
    let mut todos = VecTodoList::new();

    // Consume the first-tick periodic trigger.
    let start = chrono::Utc::now();
    scheduler.tick_at(start, &ConversationSnapshot::default(), &mut todos);

    let messages = vec![
        AgentMessage::tool("step one complete"),
        AgentMessage::tool("error: connection refused"),
        AgentMessage::tool("retrying"),
        AgentMessage::tool("request failed again"),
        AgentMessage::tool("backing off"),
        AgentMessage::tool("still waiting"),
        AgentMessage::tool("operation timeout after 30s"),
        AgentMessage::tool("giving up"),
        AgentMessage::tool("summarizing"),
        AgentMessage::tool("done"),
    ];
    let snapshot = ConversationSnapshot::new(messages, todos.tasks().to_vec());

    let five_minutes_later = start + chrono::Duration::minutes(5);
    let outcome = scheduler.tick_at(five_minutes_later, &snapshot, &mut todos);

    assert!(
        matches!(outcome, TickOutcome::Triggered { immediate: true, .. }),
        "three error messages must fire the immediate trigger, got {outcome:?}"
    );
}

/// Scenario 5: one component below the alert threshold yields exactly one
/// warning alert.
#[test]
fn health_monitor_alerts_only_on_degraded_component() {
    let report = monitor_health(&[("a".to_string(), 0.9), ("b".to_string(), 0.5)], 0.7);

    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].component, "b");
}

/// Full loop: a poor evaluation refines the prompt, persists it, and agent
/// construction picks the override up; the next trigger check sees fresh
/// history.
#[tokio::test]
async fn refinement_outcome_persists_and_resolves() {
    let pool = setup_test_db().await;
    let repo = Arc::new(SqliteOverrideRepository::new(pool.clone()));

    let metrics = StaticMetrics::from_pairs(&[
        ("success_rate", 0.95),
        ("response_quality", 0.9),
        ("efficiency", 0.6),
        ("error_handling", 0.7),
    ]);
    let evaluator = PerformanceEvaluator::new(Arc::new(metrics), EvaluatorConfig::default());
    let analysis = evaluator.evaluate("research_agent", &[], 24.0).await.unwrap();
    assert!(analysis.improvement_needed);
    assert_eq!(analysis.priority_areas[0], Criterion::Efficiency);

    let refiner = PromptRefiner::with_default_config();
    let outcome = refiner.refine(
        "You are a research agent.",
        &analysis,
        &reforge::domain::models::ResearchFindings::empty(),
        &[ImprovementTag::ErrorHandling, ImprovementTag::Clarity],
    );
    assert!(outcome.improved_prompt.starts_with("You are a research agent."));
    assert_eq!(outcome.change_summary.improvements_applied, 2);

    let draft = OverrideDraft::new(
        "research_agent",
        outcome.improved_prompt.clone(),
        "triggered by efficiency and error_handling shortfall",
        0.85,
    )
    .with_original_prompt("You are a research agent.");
    repo.save(&draft).await.unwrap();

    let resolver = PromptResolver::new(repo.clone());
    let bound = resolver
        .resolve_system_prompt("research_agent", "You are a research agent.")
        .await
        .unwrap();
    assert_eq!(bound, outcome.improved_prompt);

    // The save stamped fresh history: a healthy score no longer triggers.
    let trigger = RefinementTrigger::new(repo);
    let decision = trigger
        .should_trigger("research_agent", 0.95, 0.8, 24.0)
        .await
        .unwrap();
    assert!(!decision.should_trigger);

    teardown_test_db(pool).await;
}
