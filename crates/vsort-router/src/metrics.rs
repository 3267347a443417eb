//! Prometheus metrics for the router worker.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use vsort_models::Disposition;

/// Metric names as constants for consistency.
pub mod names {
    pub const ARTIFACTS_ROUTED_TOTAL: &str = "vsort_artifacts_routed_total";
    pub const CLASSIFY_FAILURES_TOTAL: &str = "vsort_classify_failures_total";
    pub const POLL_CYCLES_TOTAL: &str = "vsort_poll_cycles_total";
}

/// Install the Prometheus recorder with a scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()
}

/// Record a routed artifact, labelled by its final disposition.
pub fn record_disposition(disposition: Disposition) {
    let labels = [("disposition", disposition.prefix().to_string())];
    counter!(names::ARTIFACTS_ROUTED_TOTAL, &labels).increment(1);
}

/// Record a failed classify-then-decide pass.
pub fn record_classify_failure() {
    counter!(names::CLASSIFY_FAILURES_TOTAL).increment(1);
}

/// Record one completed poll cycle over the source prefix.
pub fn record_poll_cycle() {
    counter!(names::POLL_CYCLES_TOTAL).increment(1);
}
