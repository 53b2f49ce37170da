//! Prometheus collectors, exposed on `/metrics`

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

lazy_static! {
    /// Resolution requests by source type
    pub static ref RESOLVE_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "iptv_resolve_requests_total",
        "Resolution requests by source type",
        &["source"]
    )
    .unwrap();

    /// Resolution requests that ended in a fetch error
    pub static ref RESOLVE_FAILURES: IntCounterVec = register_int_counter_vec!(
        "iptv_resolve_failures_total",
        "Resolution requests that failed to fetch their source",
        &["source"]
    )
    .unwrap();

    pub static ref CHANNELS_RETURNED: Histogram = register_histogram!(
        "iptv_channels_returned",
        "Channels returned per resolution",
        vec![0.0, 1.0, 10.0, 100.0, 1_000.0, 10_000.0, 100_000.0]
    )
    .unwrap();

    pub static ref UPLOADS: IntCounter =
        register_int_counter!("iptv_uploads_total", "Playlists uploaded").unwrap();
}
