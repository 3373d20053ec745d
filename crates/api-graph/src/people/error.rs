use crate::error::{IntoStatusCode, error_response};
use axum::response::IntoResponse;
use core_executor::ExecutionError;
use http::StatusCode;
use snafu::prelude::*;

pub type PeopleResult<T> = Result<T, PeopleAPIError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PeopleAPIError {
    #[snafu(display("Get friends error: {source}"))]
    Friends { source: ExecutionError },
    #[snafu(display("Get movie cast error: {source}"))]
    Cast { source: ExecutionError },
}

impl IntoStatusCode for PeopleAPIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Friends { source } | Self::Cast { source } => source.status_code(),
        }
    }
}

impl IntoResponse for PeopleAPIError {
    fn into_response(self) -> axum::response::Response {
        error_response(&self)
    }
}
