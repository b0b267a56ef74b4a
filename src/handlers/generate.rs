use axum::{
    body::Body,
    extract::{Query, State, rejection::QueryRejection},
    http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
    response::Response,
};
use std::sync::Arc;
use tracing::info;

use super::now_ms;
use crate::error::AppError;
use crate::metrics::{COOLDOWN_REJECTIONS, GENERATE_REQUESTS};
use crate::models::{ImageParams, ImageQuery};
use crate::rate_limit::Acquire;
use crate::state::AppState;

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ImageQuery>, QueryRejection>,
) -> Response {
    GENERATE_REQUESTS.inc();

    match generate(&state, query).await {
        Ok(res) => res,
        Err(e) => e.into_response_for("Failed to generate image"),
    }
}

async fn generate(
    state: &AppState,
    query: Result<Query<ImageQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let params = ImageParams::try_from(query)?;

    // a denied attempt leaves the gate untouched
    if let Acquire::Denied { remaining_seconds } = state.cooldown.try_acquire(now_ms()) {
        COOLDOWN_REJECTIONS.inc();
        return Err(AppError::CooldownActive { remaining_seconds });
    }

    let image = state.provider.fetch(&params).await?;
    info!(bytes = image.len(), "preview generated");

    Response::builder()
        .header(CONTENT_TYPE, "image/png")
        .header(CACHE_CONTROL, format!("public, max-age={}", state.cache_max_age))
        .header(CONTENT_DISPOSITION, r#"inline; filename="iqc-generated.png""#)
        .body(Body::from(image))
        .map_err(|e| AppError::Unexpected(e.to_string()))
}
