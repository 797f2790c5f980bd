//! Metrics module for ticket-service.
//! Provides Prometheus metrics for HTTP traffic, database queries, and
//! ingestion activity.

use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec,
    IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

/// Database query duration histogram
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        histogram_opts!(
            "ticket_db_query_duration_seconds",
            "Database query duration"
        ),
        &["operation"]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// HTTP request counter
pub static HTTP_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// HTTP request duration histogram
pub static HTTP_REQUEST_DURATION: OnceLock<HistogramVec> = OnceLock::new();

/// Tickets created counter, by origin
pub static TICKETS_CREATED_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Slack poll counter, by outcome
pub static SLACK_POLLS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    HTTP_REQUESTS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "ticket_http_requests_total",
                "Total HTTP requests by method, path and status"
            ),
            &["method", "path", "status"]
        )
        .expect("Failed to register HTTP_REQUESTS_TOTAL")
    });

    HTTP_REQUEST_DURATION.get_or_init(|| {
        register_histogram_vec!(
            histogram_opts!(
                "ticket_http_request_duration_seconds",
                "HTTP request duration",
                vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
            ),
            &["method", "path"]
        )
        .expect("Failed to register HTTP_REQUEST_DURATION")
    });

    TICKETS_CREATED_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "ticket_tickets_created_total",
                "Total tickets created by origin"
            ),
            &["source"]
        )
        .expect("Failed to register TICKETS_CREATED_TOTAL")
    });

    SLACK_POLLS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "ticket_slack_polls_total",
                "Total Slack poll invocations by outcome"
            ),
            &["outcome"]
        )
        .expect("Failed to register SLACK_POLLS_TOTAL")
    });

    // Force initialization of lazy statics
    let _ = &*DB_QUERY_DURATION;
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    if let Some(counter) = HTTP_REQUESTS_TOTAL.get() {
        counter
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
    }
    if let Some(histogram) = HTTP_REQUEST_DURATION.get() {
        histogram
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }
}

/// Record a created ticket.
pub fn record_ticket_created(source: &str) {
    if let Some(counter) = TICKETS_CREATED_TOTAL.get() {
        counter.with_label_values(&[source]).inc();
    }
}

/// Record a Slack poll invocation.
pub fn record_slack_poll(outcome: &str) {
    if let Some(counter) = SLACK_POLLS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}
