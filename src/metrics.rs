use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};


lazy_static! {
    pub static ref GENERATE_REQUESTS: Counter =
        register_counter!("iqc_generate_requests_total", "Total generate requests").unwrap();
    pub static ref DOWNLOAD_REQUESTS: Counter =
        register_counter!("iqc_download_requests_total", "Total download requests").unwrap();
    pub static ref COOLDOWN_REJECTIONS: Counter =
        register_counter!("iqc_cooldown_rejections_total", "Generate requests rejected by the cooldown").unwrap();
    pub static ref UPSTREAM_FAILURES: Counter =
        register_counter!("iqc_upstream_failures_total", "Failed calls to the image provider").unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "iqc_upstream_latency_seconds",
        "Image provider latency in seconds"
    )
    .unwrap();
}
