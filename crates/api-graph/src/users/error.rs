use crate::error::{IntoStatusCode, error_response};
use axum::response::IntoResponse;
use core_executor::ExecutionError;
use http::StatusCode;
use snafu::prelude::*;

pub type UsersResult<T> = Result<T, UsersAPIError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum UsersAPIError {
    #[snafu(display("Get users error: {source}"))]
    List { source: ExecutionError },
    #[snafu(display("Get user error: {source}"))]
    Get { source: ExecutionError },
    #[snafu(display("Query users error: {source}"))]
    Query { source: ExecutionError },
    #[snafu(display("Create user error: {source}"))]
    Create { source: ExecutionError },
    #[snafu(display("Update user error: {source}"))]
    Update { source: ExecutionError },
    #[snafu(display("Delete user error: {source}"))]
    Delete { source: ExecutionError },
    #[snafu(display("User overview error: {source}"))]
    Overview { source: ExecutionError },
    #[snafu(display("User not found: {id}"))]
    NotFound { id: String },
    #[snafu(display("Database returned no row for created user {id}"))]
    NotReturned { id: String },
}

impl IntoStatusCode for UsersAPIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::List { source }
            | Self::Get { source }
            | Self::Query { source }
            | Self::Create { source }
            | Self::Update { source }
            | Self::Delete { source }
            | Self::Overview { source } => source.status_code(),
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::NotReturned { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UsersAPIError {
    fn into_response(self) -> axum::response::Response {
        error_response(&self)
    }
}
