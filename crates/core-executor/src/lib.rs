pub mod coordinator;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod models;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use coordinator::{QueryCoordinator, QueryOptions};
pub use error::{AggregationError, ExecutionError, ExecutionResult, HandlerResult};
pub use executor::QueryExecutor;
pub use handlers::{collect_handler, merge_handler, single_handler};
pub use models::{QueryRequest, QueryResult};
