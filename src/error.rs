use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorBody;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required parameters: time and messageText")]
    MissingParameter,

    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Please wait {remaining_seconds} seconds before generating again")]
    CooldownActive { remaining_seconds: u64 },

    #[error("External API error: {}", status.as_u16())]
    Upstream { status: reqwest::StatusCode },

    #[error("External API unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream { .. } | AppError::Transport(_) | AppError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    // Render the JSON body, `failure` labels 5xx errors with the endpoint's action
    pub fn into_response_for(self, failure: &str) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::MissingParameter => {
                warn!("rejected request: {self}");
                ErrorBody {
                    error: "Missing required parameters".to_string(),
                    message: self.to_string(),
                    remaining_seconds: None,
                }
            }
            AppError::InvalidQuery(_) => {
                warn!("rejected request: {self}");
                ErrorBody {
                    error: "Invalid query string".to_string(),
                    message: self.to_string(),
                    remaining_seconds: None,
                }
            }
            AppError::CooldownActive { remaining_seconds } => {
                warn!(remaining_seconds, "cooldown active");
                ErrorBody {
                    error: "Cooldown active".to_string(),
                    message: self.to_string(),
                    remaining_seconds: Some(*remaining_seconds),
                }
            }
            AppError::Upstream { .. } | AppError::Transport(_) | AppError::Unexpected(_) => {
                error!("{failure}: {self}");
                ErrorBody {
                    error: failure.to_string(),
                    message: self.to_string(),
                    remaining_seconds: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
