//! System health aggregation and trend reporting.
//!
//! Read-only views over per-component scores and historical metric series.
//! Nothing here mutates state or performs I/O.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Relative change below which a trend counts as flat.
const FLAT_EPSILON: f64 = 0.02;

/// Health classification of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Healthy,
    Degraded,
}

/// Severity of a health alert. Fixed at `Warning` in this design; there are
/// no escalation tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Warning,
}

/// One component's health entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub score: f64,
    pub status: ComponentStatus,
}

/// Alert raised for a below-threshold component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAlert {
    pub component: String,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Aggregated system health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Mean of the component scores; 0.0 with no components.
    pub overall_score: f64,
    pub components: Vec<ComponentHealth>,
    /// One warning per component scoring below the alert threshold.
    pub alerts: Vec<HealthAlert>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Aggregate per-component scores into a health report.
///
/// Components are reported in the supplied order; each component scoring
/// below `alert_threshold` contributes exactly one warning alert.
pub fn monitor_health(component_scores: &[(String, f64)], alert_threshold: f64) -> HealthReport {
    let components: Vec<ComponentHealth> = component_scores
        .iter()
        .map(|(name, score)| ComponentHealth {
            name: name.clone(),
            score: *score,
            status: if *score < alert_threshold {
                ComponentStatus::Degraded
            } else {
                ComponentStatus::Healthy
            },
        })
        .collect();

    let alerts: Vec<HealthAlert> = components
        .iter()
        .filter(|c| c.status == ComponentStatus::Degraded)
        .map(|c| HealthAlert {
            component: c.name.clone(),
            severity: AlertSeverity::Warning,
            message: format!("{} performance below threshold", c.name),
        })
        .collect();

    let overall_score = if components.is_empty() {
        0.0
    } else {
        components.iter().map(|c| c.score).sum::<f64>() / components.len() as f64
    };

    HealthReport {
        overall_score,
        components,
        alerts,
    }
}

/// One sample in a historical metric series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Direction of a metric over the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Flat,
}

/// Trend analysis over a metric series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub direction: TrendDirection,
    /// Relative change between first-half and second-half means.
    pub change_ratio: f64,
    pub samples_analyzed: usize,
    pub insights: Vec<String>,
}

/// Analyze a metric series over the trailing `window_days`.
///
/// The window is anchored to the newest sample, keeping the analysis
/// deterministic for a fixed series. Direction compares the mean of the
/// first half of the windowed samples to the second half; a relative change
/// within 2% counts as flat.
pub fn analyze_trends(series: &[MetricPoint], window_days: i64) -> TrendReport {
    let mut points: Vec<MetricPoint> = series.to_vec();
    points.sort_by_key(|p| p.timestamp);

    if let Some(newest) = points.last().map(|p| p.timestamp) {
        let cutoff = newest - Duration::days(window_days);
        points.retain(|p| p.timestamp >= cutoff);
    }

    let samples = points.len();
    if samples < 2 {
        return TrendReport {
            direction: TrendDirection::Flat,
            change_ratio: 0.0,
            samples_analyzed: samples,
            insights: vec![format!(
                "Insufficient data: {samples} sample(s) in the {window_days}-day window"
            )],
        };
    }

    let mid = samples / 2;
    let first_mean = mean(&points[..mid]);
    let second_mean = mean(&points[mid..]);

    let change_ratio = if first_mean.abs() < f64::EPSILON {
        0.0
    } else {
        (second_mean - first_mean) / first_mean
    };

    let direction = if change_ratio.abs() <= FLAT_EPSILON {
        TrendDirection::Flat
    } else if change_ratio > 0.0 {
        TrendDirection::Improving
    } else {
        TrendDirection::Declining
    };

    let mut insights = vec![format!(
        "{} samples analyzed over the last {window_days} day(s)",
        samples
    )];
    match direction {
        TrendDirection::Improving => insights.push(format!(
            "Metric improved by {:.1}% over the period",
            change_ratio * 100.0
        )),
        TrendDirection::Declining => insights.push(format!(
            "Metric declined by {:.1}% over the period",
            change_ratio.abs() * 100.0
        )),
        TrendDirection::Flat => {
            insights.push("Metric is stable over the period".to_string());
        }
    }

    TrendReport {
        direction,
        change_ratio,
        samples_analyzed: samples,
        insights,
    }
}

fn mean(points: &[MetricPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64
}
