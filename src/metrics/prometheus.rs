//! Prometheus metrics integration

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{Encoder, TextEncoder, IntCounter, IntGauge, Histogram, HistogramOpts, opts, register_int_counter, register_int_gauge, register_histogram};

// Define metrics
static STORAGE_REPORT_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        opts!("storage_report_requests_total", "Total number of storage report requests")
    )
    .expect("Failed to create storage report requests counter")
});

static STORAGE_REPORT_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        opts!("storage_report_failures_total", "Storage reports that failed on the usage path")
    )
    .expect("Failed to create storage report failures counter")
});

static DRIVE_ENUMERATION_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        opts!("drive_enumeration_failures_total", "Drive enumerations that failed and were reported empty")
    )
    .expect("Failed to create drive enumeration failures counter")
});

static DRIVES_DETECTED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        opts!("drives_detected", "Physical drives found by the last storage report")
    )
    .expect("Failed to create drives gauge")
});

static STORAGE_REPORT_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(HistogramOpts::new(
        "storage_report_duration_seconds",
        "Time spent collecting a storage report in seconds"
    ))
    .expect("Failed to create storage report duration histogram")
});

static HEARTBEAT_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        opts!("heartbeat_requests_total", "Total number of heartbeat requests")
    )
    .expect("Failed to create heartbeat requests counter")
});

/// Initialize all metrics
pub fn init_metrics() {
    // Force lazy initialization
    Lazy::force(&STORAGE_REPORT_REQUESTS_TOTAL);
    Lazy::force(&STORAGE_REPORT_FAILURES_TOTAL);
    Lazy::force(&DRIVE_ENUMERATION_FAILURES_TOTAL);
    Lazy::force(&DRIVES_DETECTED);
    Lazy::force(&STORAGE_REPORT_DURATION);
    Lazy::force(&HEARTBEAT_REQUESTS_TOTAL);
}

/// Record a storage report request
pub fn record_storage_report_request() {
    STORAGE_REPORT_REQUESTS_TOTAL.inc();
}

/// Record a storage report that failed on the usage path
pub fn record_storage_report_failure() {
    STORAGE_REPORT_FAILURES_TOTAL.inc();
}

/// Record a swallowed drive enumeration failure
pub fn record_drive_enumeration_failure() {
    DRIVE_ENUMERATION_FAILURES_TOTAL.inc();
}

/// Set the number of drives in the last report
pub fn set_drives_detected(count: i64) {
    DRIVES_DETECTED.set(count);
}

/// Record storage report collection time
pub fn record_storage_report_duration(duration_secs: f64) {
    STORAGE_REPORT_DURATION.observe(duration_secs);
}

/// Number of storage report durations observed so far
pub fn storage_report_duration_count() -> u64 {
    STORAGE_REPORT_DURATION.get_sample_count()
}

/// Record a heartbeat request
pub fn record_heartbeat_request() {
    HEARTBEAT_REQUESTS_TOTAL.inc();
}

/// Prometheus metrics endpoint
pub async fn metrics_endpoint() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(format!("Failed to encode metrics: {}", e));
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        init_metrics();

        // Just verify they can be updated
        record_storage_report_request();
        record_storage_report_duration(0.1);
        set_drives_detected(2);
        record_heartbeat_request();
    }

    #[actix_rt::test]
    async fn test_metrics_endpoint_exposes_counters() {
        init_metrics();
        record_storage_report_request();

        let response = metrics_endpoint().await;
        assert!(response.status().is_success());

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("storage_report_requests_total"));
    }
}
