//! HTTP adapters for injected collaborators.

pub mod metrics_client;

pub use metrics_client::HttpMetricsClient;
