//! HTTP-backed metrics source.
//!
//! Fetches an agent's raw metric map from a metrics service as
//! `GET {base}/agents/{name}/metrics?window_hours=N`, expecting a flat JSON
//! object of metric name to number. Transient failures (connect errors,
//! 5xx) are retried with exponential backoff; client errors are not.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use reqwest::{Client, StatusCode};

use crate::domain::models::MetricsApiConfig;
use crate::domain::ports::errors::MetricsError;
use crate::domain::ports::MetricsSource;

/// HTTP client for a metrics service exposing per-agent metric maps.
#[derive(Debug, Clone)]
pub struct HttpMetricsClient {
    http: Client,
    base_url: String,
    api_token: Option<String>,
    max_retry_secs: u64,
}

impl HttpMetricsClient {
    /// Build a client from configuration.
    pub fn new(config: &MetricsApiConfig) -> Result<Self, MetricsError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| MetricsError::Unavailable(format!("failed to build client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            max_retry_secs: config.max_retry_secs,
        })
    }

    async fn fetch_once(
        &self,
        agent_name: &str,
        time_window_hours: f64,
    ) -> Result<HashMap<String, f64>, backoff::Error<MetricsError>> {
        let url = format!("{}/agents/{}/metrics", self.base_url, agent_name);

        let mut request = self
            .http
            .get(&url)
            .query(&[("window_hours", time_window_hours)]);
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            // Network-level failures are worth retrying.
            backoff::Error::transient(MetricsError::Unavailable(e.to_string()))
        })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(backoff::Error::transient(MetricsError::Unavailable(
                format!("metrics service returned {status}"),
            )));
        }
        if status == StatusCode::NOT_FOUND {
            // Unknown agent: report an empty window rather than failing the
            // evaluation outright.
            return Ok(HashMap::new());
        }
        if !status.is_success() {
            return Err(backoff::Error::permanent(MetricsError::Unavailable(
                format!("metrics service returned {status}"),
            )));
        }

        response
            .json::<HashMap<String, f64>>()
            .await
            .map_err(|e| backoff::Error::permanent(MetricsError::Malformed(e.to_string())))
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsClient {
    async fn fetch(
        &self,
        agent_name: &str,
        time_window_hours: f64,
    ) -> Result<HashMap<String, f64>, MetricsError> {
        let backoff = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(100))
            .with_max_elapsed_time(Some(Duration::from_secs(self.max_retry_secs)))
            .build();

        backoff::future::retry(backoff, || async {
            self.fetch_once(agent_name, time_window_hours).await
        })
        .await
        .map_err(|e| {
            tracing::warn!(agent_name, error = %e, "metrics fetch exhausted retries");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> MetricsApiConfig {
        MetricsApiConfig {
            base_url: base_url.to_string(),
            api_token: None,
            request_timeout_secs: 5,
            max_retry_secs: 1,
        }
    }

    #[tokio::test]
    async fn test_fetch_parses_metric_map() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/agents/research_agent/metrics")
            .match_query(mockito::Matcher::Regex("window_hours=24".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success_rate": 0.93, "error_rate": 0.07}"#)
            .create_async()
            .await;

        let client = HttpMetricsClient::new(&config(&server.url())).unwrap();
        let metrics = client.fetch("research_agent", 24.0).await.unwrap();

        mock.assert_async().await;
        assert!((metrics["success_rate"] - 0.93).abs() < 1e-9);
        assert!((metrics["error_rate"] - 0.07).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_agent_yields_empty_map() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/agents/ghost/metrics".into()))
            .with_status(404)
            .create_async()
            .await;

        let client = HttpMetricsClient::new(&config(&server.url())).unwrap();
        let metrics = client.fetch("ghost", 24.0).await.unwrap();
        assert!(metrics.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_retries_then_surfaces_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Regex(r"^/agents/flaky/metrics".into()))
            .with_status(500)
            .expect_at_least(2)
            .create_async()
            .await;

        let client = HttpMetricsClient::new(&config(&server.url())).unwrap();
        let err = client.fetch("flaky", 24.0).await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, MetricsError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_permanent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Regex(r"^/agents/bad/metrics".into()))
            .with_status(200)
            .with_body("not json")
            .expect(1)
            .create_async()
            .await;

        let client = HttpMetricsClient::new(&config(&server.url())).unwrap();
        let err = client.fetch("bad", 24.0).await.unwrap_err();

        // Exactly one request: malformed bodies must not be retried.
        mock.assert_async().await;
        assert!(matches!(err, MetricsError::Malformed(_)));
    }
}
