use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use std::sync::LazyLock;
use vnpay::client_ip::ResolvedIp;
use vnpay::ClientIpError;

/// `source` label for resolutions that produced the `Invalid IP:` sentinel.
pub const INVALID_SOURCE: &str = "invalid";

pub static REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "vnpay_server_requests_total",
        "Total HTTP requests",
        &["endpoint", "status"]
    )
    .unwrap()
});

pub static IP_RESOLUTIONS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "vnpay_ip_resolutions_total",
        "Client IP resolutions by source (forwarded, remote, invalid)",
        &["source"]
    )
    .unwrap()
});

/// Count one resolver outcome under its `source` label.
pub fn record_resolution(outcome: &Result<ResolvedIp, ClientIpError>) {
    let source = match outcome {
        Ok(resolved) => resolved.source.as_str(),
        Err(_) => INVALID_SOURCE,
    };
    IP_RESOLUTIONS.with_label_values(&[source]).inc();
}

pub fn metrics_output() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Serialises tests that assert exact counter deltas on the global registry.
#[cfg(test)]
pub(crate) static TEST_COUNTER_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
