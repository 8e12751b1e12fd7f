use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

/// Every way a proxy request can fail, as seen by the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No authorization header")]
    Unauthenticated,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Validation(String),
    #[error("Apps Script URL not configured")]
    Config,
    #[error("Failed to fetch sheet data")]
    Fetch { detail: String },
    #[error("{0}")]
    Update(String),
    #[error("Invalid action")]
    InvalidAction,
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) | AppError::Update(_) | AppError::InvalidAction => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config | AppError::Fetch { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Webhook-reported failure; falls back to a generic message.
    pub fn update(message: Option<String>) -> Self {
        match message.filter(|m| !m.trim().is_empty()) {
            Some(m) => AppError::Update(m),
            None => AppError::Update("Update failed".into()),
        }
    }

    /// Sheet export failure; the cause is logged, never sent to the caller.
    pub fn fetch(err: anyhow::Error) -> Self {
        AppError::Fetch {
            detail: format!("{err:#}"),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if message.trim().is_empty() {
            AppError::Internal("Unknown error".into())
        } else {
            AppError::Internal(message)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Fetch { detail } = &self {
            error!(%status, error = %self, %detail, "request failed");
        } else if status.is_server_error() {
            error!(%status, error = %self, "request failed");
        } else {
            warn!(%status, error = %self, "request rejected");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
