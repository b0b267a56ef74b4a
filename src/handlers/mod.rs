mod download;
mod generate;
mod health;
mod metrics;

pub use download::download_handler;
pub use generate::generate_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;

// Current wall clock in epoch millis, shared by the cooldown and filenames
fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
