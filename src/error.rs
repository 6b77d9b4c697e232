use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::utils::now_iso;

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a handler can surface to a client. Field validation is checked
/// before the configuration gate, so `BadRequest` always wins over
/// `NotConfigured` when both would apply.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Integration credentials are absent. The hint names the variable(s) to
    /// set, mirroring the remediation text the frontend shows.
    #[error("{service}: {hint}")]
    NotConfigured { service: &'static str, hint: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn not_configured(service: &'static str, hint: impl Into<String>) -> Self {
        ApiError::NotConfigured {
            service,
            hint: hint.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, "Bad Request", m.clone()),
            ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "Unauthorized", m.clone()),
            ApiError::NotConfigured { service, hint } => {
                log::warn!("api.not_configured service={service}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service Unavailable",
                    hint.clone(),
                )
            }
            ApiError::Internal(e) => {
                log::error!("api.internal_error {e:#}");
                // Error detail stays server-side in production.
                let msg = if crate::config::is_production() {
                    "Internal Server Error".to_string()
                } else {
                    format!("{e:#}")
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    msg,
                )
            }
        };

        (
            status,
            Json(json!({
                "error": error,
                "message": message,
                "timestamp": now_iso(),
            })),
        )
            .into_response()
    }
}
