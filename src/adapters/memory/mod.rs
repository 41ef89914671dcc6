//! In-memory collaborator implementations.
//!
//! Process-local stand-ins for the injected ports: a plain `Vec`-backed
//! to-do list, a fixed metrics map, and the canned best-practice research
//! corpus. Useful for embedding without external services and throughout
//! the test suite.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::models::research::Applicability;
use crate::domain::models::{ResearchFinding, ResearchFindings, TodoTask};
use crate::domain::ports::errors::{MetricsError, ResearchError, TodoSinkError};
use crate::domain::ports::{MetricsSource, ResearchSource, TodoSink};

/// A `Vec`-backed to-do list.
#[derive(Debug, Default, Clone)]
pub struct VecTodoList {
    tasks: Vec<TodoTask>,
}

impl VecTodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks, in append order.
    pub fn tasks(&self) -> &[TodoTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl TodoSink for VecTodoList {
    fn append(&mut self, tasks: Vec<TodoTask>) -> Result<(), TodoSinkError> {
        self.tasks.extend(tasks);
        Ok(())
    }
}

/// A metrics source returning the same fixed map for every agent.
#[derive(Debug, Clone, Default)]
pub struct StaticMetrics {
    metrics: HashMap<String, f64>,
}

impl StaticMetrics {
    pub fn new(metrics: HashMap<String, f64>) -> Self {
        Self { metrics }
    }

    /// Convenience constructor from `(name, value)` pairs.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            metrics: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
        }
    }
}

#[async_trait]
impl MetricsSource for StaticMetrics {
    async fn fetch(
        &self,
        _agent_name: &str,
        _time_window_hours: f64,
    ) -> Result<HashMap<String, f64>, MetricsError> {
        Ok(self.metrics.clone())
    }
}

/// Research source serving a small embedded best-practice corpus.
///
/// Findings are keyed by focus area; unknown areas simply contribute
/// nothing. Real web research belongs to a host-injected collaborator.
#[derive(Debug, Clone, Default)]
pub struct CannedResearch;

impl CannedResearch {
    pub fn new() -> Self {
        Self
    }

    fn corpus() -> Vec<ResearchFinding> {
        vec![
            ResearchFinding {
                area: "prompt_engineering".to_string(),
                finding: "Chain-of-thought prompting significantly improves reasoning tasks"
                    .to_string(),
                source: "Wei et al. 2022".to_string(),
                applicability: Applicability::High,
                implementation: "Add step-by-step reasoning instructions to complex tasks"
                    .to_string(),
            },
            ResearchFinding {
                area: "error_handling".to_string(),
                finding: "Explicit error state definitions improve agent reliability".to_string(),
                source: "Pondhouse Data 2024".to_string(),
                applicability: Applicability::High,
                implementation: "Define clear error types and recovery actions".to_string(),
            },
            ResearchFinding {
                area: "agent_coordination".to_string(),
                finding: "Hierarchical oversight prevents task derailment".to_string(),
                source: "Pondhouse Data 2024".to_string(),
                applicability: Applicability::Medium,
                implementation: "Implement supervisor-worker agent patterns".to_string(),
            },
        ]
    }
}

#[async_trait]
impl ResearchSource for CannedResearch {
    async fn search(&self, focus_areas: &[String]) -> Result<ResearchFindings, ResearchError> {
        let findings: Vec<_> = Self::corpus()
            .into_iter()
            .filter(|f| focus_areas.iter().any(|a| a == &f.area))
            .collect();

        Ok(ResearchFindings {
            focus_areas: focus_areas.to_vec(),
            findings,
        })
    }
}

/// A sink that rejects every append; for exercising fail-open paths.
#[derive(Debug, Default)]
pub struct FailingTodoSink;

impl TodoSink for FailingTodoSink {
    fn append(&mut self, _tasks: Vec<TodoTask>) -> Result<(), TodoSinkError> {
        Err(TodoSinkError("sink is closed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_vec_todo_list_appends_in_order() {
        let mut list = VecTodoList::new();
        list.append(vec![
            TodoTask::evaluation("first"),
            TodoTask::evaluation("second"),
        ])
        .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].content, "first");
        assert_eq!(list.tasks()[1].content, "second");
    }

    #[tokio::test]
    async fn test_canned_research_filters_by_area() {
        let source = CannedResearch::new();
        let findings = source
            .search(&["error_handling".to_string()])
            .await
            .unwrap();

        assert_eq!(findings.findings.len(), 1);
        assert_eq!(findings.findings[0].area, "error_handling");
    }

    #[tokio::test]
    async fn test_canned_research_unknown_area_is_empty() {
        let source = CannedResearch::new();
        let findings = source.search(&["quantum_prompts".to_string()]).await.unwrap();
        assert!(findings.is_empty());
    }
}
