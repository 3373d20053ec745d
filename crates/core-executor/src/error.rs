use core_graphdb::GraphDbError;
use snafu::prelude::*;
use std::time::Duration;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ExecutionError {
    #[snafu(display("Query {name} failed: {source}"))]
    Query { name: String, source: GraphDbError },

    #[snafu(display("Cannot decode rows of query {name}: {source}"))]
    Decode {
        name: String,
        source: serde_json::Error,
    },

    #[snafu(display("Query results aggregation failed: {source}"))]
    Aggregation { source: AggregationError },

    #[snafu(display(
        "Queries timed out after {}ms, pending: {}",
        timeout.as_millis(),
        pending.join(", ")
    ))]
    Timeout {
        timeout: Duration,
        pending: Vec<String>,
    },

    #[snafu(display("Queries cancelled, pending: {}", pending.join(", ")))]
    Cancelled { pending: Vec<String> },

    #[snafu(display("Query task {name} did not complete: {source}"))]
    TaskJoin {
        name: String,
        source: tokio::task::JoinError,
    },
}

impl ExecutionError {
    /// Name of the request the error originates from, if it is tied to one.
    #[must_use]
    pub fn request_name(&self) -> Option<&str> {
        match self {
            Self::Query { name, .. } | Self::Decode { name, .. } | Self::TaskJoin { name, .. } => {
                Some(name)
            }
            Self::Aggregation { .. } | Self::Timeout { .. } | Self::Cancelled { .. } => None,
        }
    }
}

pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Errors reported by result handlers after all queries of a batch completed.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum AggregationError {
    #[snafu(display("Expected {expected} query results, got {actual}"))]
    UnexpectedCount { expected: usize, actual: usize },

    #[snafu(display("Inconsistent query results: {message}"))]
    Inconsistent { message: String },

    #[snafu(display("{source}"))]
    External {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type HandlerResult<T> = std::result::Result<T, AggregationError>;
