use axum::{
    body::Body,
    extract::{Query, State, rejection::QueryRejection},
    http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
    response::Response,
};
use std::sync::Arc;
use tracing::info;

use super::now_ms;
use crate::error::AppError;
use crate::metrics::DOWNLOAD_REQUESTS;
use crate::models::{ImageParams, ImageQuery};
use crate::state::AppState;

// Same upstream call as generate, but no cooldown and served as a file
pub async fn download_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ImageQuery>, QueryRejection>,
) -> Response {
    DOWNLOAD_REQUESTS.inc();

    match download(&state, query).await {
        Ok(res) => res,
        Err(e) => e.into_response_for("Failed to download image"),
    }
}

async fn download(
    state: &AppState,
    query: Result<Query<ImageQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let params = ImageParams::try_from(query)?;

    let image = state.provider.fetch(&params).await?;
    let filename = attachment_filename(now_ms());
    info!(bytes = image.len(), %filename, "download served");

    Response::builder()
        .header(CONTENT_TYPE, "image/png")
        .header(CONTENT_DISPOSITION, format!(r#"attachment; filename="{filename}""#))
        .header(CONTENT_LENGTH, image.len())
        .header(CACHE_CONTROL, "no-cache")
        .body(Body::from(image))
        .map_err(|e| AppError::Unexpected(e.to_string()))
}

pub(crate) fn attachment_filename(now_ms: i64) -> String {
    format!("iqc-{now_ms}.png")
}
