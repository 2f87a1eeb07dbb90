//! Upstream services.
//!
//! Each capability is an independent leaf: it builds one outbound request from
//! its [`ProviderConfig`](crate::core::ProviderConfig), sends it with the
//! provider's timeout and maps the typed upstream payload into a domain value.

pub mod chat;
pub mod domain;
pub mod image;
pub mod search;

pub use chat::{ChatModel, ChatReply};
pub use domain::{DomainReport, HostResolver, SystemResolver};
pub use image::GeneratedImage;
pub use search::SearchHit;

use crate::core::{metrics::record_upstream, AppConfig, Result};
use std::future::Future;
use std::time::{Duration, Instant};

/// Create the shared HTTP client with connection pooling.
///
/// Timeouts are applied per request from each provider's configuration.
pub fn build_http_client(config: &AppConfig) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(!config.verify_ssl)
        .pool_max_idle_per_host(32)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()?;
    Ok(client)
}

/// Run one upstream call, recording its latency and outcome.
pub(crate) async fn observe_upstream<T, F>(provider: &str, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let result = call.await;
    let elapsed = start.elapsed().as_secs_f64();

    record_upstream(provider, result.is_ok(), elapsed);
    match &result {
        Ok(_) => tracing::debug!(
            request_id = %crate::core::get_request_id(),
            provider = %provider,
            elapsed_secs = elapsed,
            "Upstream call completed"
        ),
        Err(e) => tracing::warn!(
            request_id = %crate::core::get_request_id(),
            provider = %provider,
            elapsed_secs = elapsed,
            error = %e,
            "Upstream call failed"
        ),
    }

    result
}
