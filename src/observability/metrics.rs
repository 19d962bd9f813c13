//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mux_requests_total` (counter): dispatched requests by method, outcome, status
//! - `mux_dispatch_duration_seconds` (histogram): time spent in dispatch,
//!   handler included, by method and outcome
//!
//! Outcome is one of `matched`, `redirect`, `not_found`.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed dispatch.
pub fn record_dispatch(method: &str, outcome: &'static str, status: u16, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();

    ::metrics::counter!(
        "mux_requests_total",
        "method" => method.to_string(),
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!(
        "mux_dispatch_duration_seconds",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .record(elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    fn label(key: &metrics_util::CompositeKey, name: &str) -> Option<String> {
        key.key()
            .labels()
            .find(|l| l.key() == name)
            .map(|l| l.value().to_string())
    }

    #[test]
    fn test_record_dispatch_labels() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        ::metrics::with_local_recorder(&recorder, || {
            record_dispatch("GET", "redirect", 301, Instant::now());
        });

        let entries = snapshotter.snapshot().into_vec();
        assert_eq!(entries.len(), 2);

        for (key, _, _, value) in entries {
            assert_eq!(label(&key, "method").as_deref(), Some("GET"));
            assert_eq!(label(&key, "outcome").as_deref(), Some("redirect"));
            match key.key().name() {
                "mux_requests_total" => {
                    assert_eq!(label(&key, "status").as_deref(), Some("301"));
                    assert_eq!(value, DebugValue::Counter(1));
                }
                "mux_dispatch_duration_seconds" => {
                    assert_eq!(label(&key, "status"), None);
                    assert!(matches!(value, DebugValue::Histogram(ref v) if v.len() == 1));
                }
                other => panic!("unexpected metric {other}"),
            }
        }
    }
}
