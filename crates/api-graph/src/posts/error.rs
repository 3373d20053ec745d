use crate::error::{IntoStatusCode, error_response};
use axum::response::IntoResponse;
use core_executor::ExecutionError;
use http::StatusCode;
use snafu::prelude::*;

pub type PostsResult<T> = Result<T, PostsAPIError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PostsAPIError {
    #[snafu(display("Get posts error: {source}"))]
    List { source: ExecutionError },
    #[snafu(display("Get post error: {source}"))]
    Get { source: ExecutionError },
    #[snafu(display("Query posts error: {source}"))]
    Query { source: ExecutionError },
    #[snafu(display("Create post error: {source}"))]
    Create { source: ExecutionError },
    #[snafu(display("Update post error: {source}"))]
    Update { source: ExecutionError },
    #[snafu(display("Delete post error: {source}"))]
    Delete { source: ExecutionError },
    #[snafu(display("Post not found: {id}"))]
    NotFound { id: String },
    #[snafu(display("Author not found: {id}"))]
    AuthorNotFound { id: String },
    #[snafu(display("Post must name its author by user id"))]
    MissingAuthor,
}

impl IntoStatusCode for PostsAPIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::List { source }
            | Self::Get { source }
            | Self::Query { source }
            | Self::Create { source }
            | Self::Update { source }
            | Self::Delete { source } => source.status_code(),
            Self::NotFound { .. } | Self::AuthorNotFound { .. } => StatusCode::NOT_FOUND,
            Self::MissingAuthor => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for PostsAPIError {
    fn into_response(self) -> axum::response::Response {
        error_response(&self)
    }
}
