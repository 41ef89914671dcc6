use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::errors::MetricsError;

/// Source of raw performance metrics for an agent over a time window.
///
/// The evaluator treats metric collection as an injected collaborator; the
/// map keys are metric names (`success_rate`, `total_tasks`, ...) and the
/// values are plain numbers.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch raw metrics for `agent_name` over the trailing window.
    async fn fetch(
        &self,
        agent_name: &str,
        time_window_hours: f64,
    ) -> Result<HashMap<String, f64>, MetricsError>;
}
