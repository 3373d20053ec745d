use axum::Json;
use axum::response::{IntoResponse, Response};
use core_executor::ExecutionError;
use http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub status_code: u16,
}

pub(crate) trait IntoStatusCode {
    fn status_code(&self) -> StatusCode;
}

impl IntoStatusCode for ExecutionError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Query { .. }
            | Self::Decode { .. }
            | Self::Aggregation { .. }
            | Self::TaskJoin { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::Cancelled { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Renders an API error as `ErrorResponse` json with the error's status code.
pub(crate) fn error_response<E>(error: &E) -> Response
where
    E: IntoStatusCode + std::fmt::Display,
{
    let code = error.status_code();
    if code.is_server_error() {
        tracing::error!(error = %error, status = code.as_u16(), "request failed");
    }
    let body = ErrorResponse {
        message: error.to_string(),
        status_code: code.as_u16(),
    };
    (code, Json(body)).into_response()
}
