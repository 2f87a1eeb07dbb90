//! HTTP middleware for request tracking and metrics.

use crate::core::logging::{generate_request_id, REQUEST_ID};
use crate::core::metrics::get_metrics;
use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Known client patterns for User-Agent mapping.
/// Order matters - more specific patterns come first.
const CLIENT_PATTERNS: &[(&str, &str)] = &[
    ("python-requests", "python-requests"),
    ("python-httpx", "python-httpx"),
    ("PostmanRuntime", "postman"),
    ("insomnia", "insomnia"),
    ("axios", "axios"),
    ("node-fetch", "node-fetch"),
    ("curl", "curl"),
    ("wget", "wget"),
    ("Mozilla", "browser"),
];

/// Extract normalized client name from User-Agent header
pub fn extract_client(headers: &HeaderMap) -> String {
    let raw = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if raw.is_empty() {
        return "unknown".to_string();
    }

    for (pattern, client_name) in CLIENT_PATTERNS {
        if raw.contains(pattern) {
            return client_name.to_string();
        }
    }

    // Fallback: first token, truncated to 30 chars
    let first_token = raw
        .split(|c: char| c == ' ' || c == '/')
        .next()
        .unwrap_or(raw);

    let cleaned: String = first_token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
        .take(30)
        .collect();

    if cleaned.is_empty() {
        "other".to_string()
    } else {
        cleaned
    }
}

/// Assign a request ID to every request.
///
/// An incoming `x-request-id` is reused, otherwise a UUID is generated. The ID
/// is available through [`crate::core::logging::get_request_id`] for the
/// duration of the handler and echoed back in the response header.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let mut response = REQUEST_ID.scope(request_id.clone(), next.run(request)).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Middleware for tracking request metrics.
pub struct MetricsMiddleware;

impl MetricsMiddleware {
    /// Track metrics for incoming requests.
    ///
    /// Increments the active request gauge, measures duration, records the
    /// request count by status code and logs one line per request.
    ///
    /// Series are labelled with the matched route template. Requests that
    /// matched no route are passed through without recording.
    pub async fn track_metrics(request: Request, next: Next) -> Response {
        let Some(endpoint) = request
            .extensions()
            .get::<MatchedPath>()
            .map(|path| path.as_str().to_string())
        else {
            let path = request.uri().path().to_string();
            let response = next.run(request).await;
            tracing::debug!(path = %path, status = %response.status(), "Unmatched route");
            return response;
        };
        let method = request.method().to_string();
        let client = extract_client(request.headers());

        // Skip metrics endpoint itself to avoid recursion
        if endpoint == "/metrics" {
            return next.run(request).await;
        }

        let metrics = get_metrics();
        metrics
            .active_requests
            .with_label_values(&[&endpoint])
            .inc();

        let start = Instant::now();
        let response = next.run(request).await;
        let duration = start.elapsed().as_secs_f64();
        let status_code = response.status().as_u16().to_string();

        metrics
            .request_count
            .with_label_values(&[&method, &endpoint, &status_code])
            .inc();
        metrics
            .request_duration
            .with_label_values(&[&method, &endpoint])
            .observe(duration);

        tracing::info!(
            "{} {} - status={} client={} duration={:.3}s",
            method,
            endpoint,
            status_code,
            client,
            duration
        );

        metrics
            .active_requests
            .with_label_values(&[&endpoint])
            .dec();

        response
    }
}
