use std::time::Instant;

use axum::body::Bytes;
use tracing::{debug, error};
use urlencoding::encode;

use crate::error::AppError;
use crate::metrics::{UPSTREAM_FAILURES, UPSTREAM_LATENCY};
use crate::models::ImageParams;

/// Client for the third-party renderer. Both handlers go through the same
/// URL builder so a preview and its download hit the exact same resource.
pub struct ImageProvider {
    client: reqwest::Client,
    base_url: String,
}

impl ImageProvider {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn request_url(&self, params: &ImageParams) -> String {
        format!(
            "{}?time={}&messageText={}&carrierName={}&batteryPercentage={}&signalStrength={}",
            self.base_url,
            encode(&params.time),
            encode(&params.message_text),
            encode(&params.carrier_name),
            encode(&params.battery_percentage),
            encode(&params.signal_strength),
        )
    }

    // Fetch the rendered PNG, the whole body is buffered before returning
    pub async fn fetch(&self, params: &ImageParams) -> Result<Bytes, AppError> {
        let url = self.request_url(params);
        let start_time = Instant::now();
        debug!(%url, "calling image provider");

        let result = self.fetch_url(&url).await;
        UPSTREAM_LATENCY.observe(start_time.elapsed().as_secs_f64());

        if let Err(e) = &result {
            UPSTREAM_FAILURES.inc();
            error!(%url, "image provider failed: {e}");
        }
        result
    }

    async fn fetch_url(&self, url: &str) -> Result<Bytes, AppError> {
        let res = self.client.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(AppError::Upstream { status });
        }

        Ok(res.bytes().await?)
    }
}
