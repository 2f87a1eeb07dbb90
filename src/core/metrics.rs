//! Prometheus metrics for monitoring the gateway.
//!
//! Inbound traffic is tracked by the metrics middleware; upstream calls are
//! tracked by the services that make them.

use prometheus::{
    register_gauge_vec, register_histogram_vec, register_int_counter,
    register_int_counter_vec, GaugeVec, HistogramVec, IntCounter, IntCounterVec,
};
use std::sync::OnceLock;

/// Container for all application metrics.
pub struct Metrics {
    /// Total number of requests by method, endpoint and status
    pub request_count: IntCounterVec,

    /// Request duration histogram in seconds
    pub request_duration: HistogramVec,

    /// Number of currently active requests by endpoint
    pub active_requests: GaugeVec,

    /// Upstream call latency histogram in seconds
    pub upstream_latency: HistogramVec,

    /// Upstream calls by provider and outcome (`ok` / `error`)
    pub upstream_requests: IntCounterVec,

    /// Subdomain lookups that fell back to the sentinel result
    pub subdomain_fallbacks: IntCounter,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Initialize the metrics registry.
///
/// Registration happens on the first call; later calls return the same
/// instance.
///
/// # Examples
///
/// ```no_run
/// use prime_gateway::core::metrics::init_metrics;
///
/// let metrics = init_metrics();
/// metrics.request_count.with_label_values(&["GET", "/health", "200"]).inc();
/// ```
pub fn init_metrics() -> &'static Metrics {
    METRICS.get_or_init(|| {
        let request_count = register_int_counter_vec!(
            "gateway_requests_total",
            "Total number of requests",
            &["method", "endpoint", "status_code"]
        )
        .expect("Failed to register request_count metric");

        let request_duration = register_histogram_vec!(
            "gateway_request_duration_seconds",
            "Request duration in seconds",
            &["method", "endpoint"],
            vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]
        )
        .expect("Failed to register request_duration metric");

        let active_requests = register_gauge_vec!(
            "gateway_active_requests",
            "Number of active requests",
            &["endpoint"]
        )
        .expect("Failed to register active_requests metric");

        let upstream_latency = register_histogram_vec!(
            "gateway_upstream_latency_seconds",
            "Upstream provider response latency in seconds",
            &["provider"],
            vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]
        )
        .expect("Failed to register upstream_latency metric");

        let upstream_requests = register_int_counter_vec!(
            "gateway_upstream_requests_total",
            "Total number of upstream calls",
            &["provider", "outcome"]
        )
        .expect("Failed to register upstream_requests metric");

        let subdomain_fallbacks = register_int_counter!(
            "gateway_subdomain_fallbacks_total",
            "Subdomain lookups that degraded to the fallback result"
        )
        .expect("Failed to register subdomain_fallbacks metric");

        Metrics {
            request_count,
            request_duration,
            active_requests,
            upstream_latency,
            upstream_requests,
            subdomain_fallbacks,
        }
    })
}

/// Get the global metrics instance, registering it on first use.
pub fn get_metrics() -> &'static Metrics {
    init_metrics()
}

/// Record the outcome and latency of one upstream call.
pub fn record_upstream(provider: &str, ok: bool, elapsed_secs: f64) {
    let metrics = get_metrics();
    metrics
        .upstream_latency
        .with_label_values(&[provider])
        .observe(elapsed_secs);
    metrics
        .upstream_requests
        .with_label_values(&[provider, if ok { "ok" } else { "error" }])
        .inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        let metrics = init_metrics();
        let metrics2 = get_metrics();
        assert!(std::ptr::eq(metrics, metrics2));
    }

    #[test]
    fn test_request_count_metric() {
        let metrics = init_metrics();
        let labels = ["GET", "/api/unique-test", "201"];

        let initial = metrics.request_count.with_label_values(&labels).get();
        metrics.request_count.with_label_values(&labels).inc();
        let after = metrics.request_count.with_label_values(&labels).get();

        assert_eq!(after, initial + 1);
    }

    #[test]
    fn test_active_requests_metric() {
        let metrics = init_metrics();
        let gauge = metrics.active_requests.with_label_values(&["/api/gauge-test"]);

        gauge.inc();
        gauge.inc();
        gauge.dec();
        assert_eq!(gauge.get(), 1.0);
        gauge.dec();
    }

    #[test]
    fn test_record_upstream() {
        let metrics = init_metrics();
        let ok = metrics
            .upstream_requests
            .with_label_values(&["record-test", "ok"]);
        let err = metrics
            .upstream_requests
            .with_label_values(&["record-test", "error"]);
        let (ok_before, err_before) = (ok.get(), err.get());

        record_upstream("record-test", true, 0.2);
        record_upstream("record-test", false, 1.5);

        assert_eq!(ok.get(), ok_before + 1);
        assert_eq!(err.get(), err_before + 1);
        assert!(
            metrics
                .upstream_latency
                .with_label_values(&["record-test"])
                .get_sample_count()
                >= 2
        );
    }
}
