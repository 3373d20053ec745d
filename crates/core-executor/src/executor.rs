use crate::error::{self as ex_error, ExecutionResult};
use crate::models::{QueryRequest, QueryResult};
use core_graphdb::GraphDb;
use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::ResultExt;
use std::sync::Arc;

/// Runs one request against the shared database handle.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    db: Arc<dyn GraphDb>,
}

impl QueryExecutor {
    #[must_use]
    pub fn new(db: Arc<dyn GraphDb>) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &Arc<dyn GraphDb> {
        &self.db
    }

    #[tracing::instrument(
        name = "QueryExecutor::execute",
        level = "debug",
        skip(self, request),
        fields(query = %request.name()),
        err
    )]
    pub async fn execute<T>(&self, request: QueryRequest<T>) -> ExecutionResult<QueryResult<T>>
    where
        T: DeserializeOwned,
    {
        let (name, statement, params) = request.into_parts();
        let response = self
            .db
            .run(&statement, &params)
            .await
            .context(ex_error::QuerySnafu { name: &name })?;

        let payload = response
            .records()
            .map(|record| serde_json::from_value::<T>(Value::Object(record)))
            .collect::<Result<Vec<_>, _>>()
            .context(ex_error::DecodeSnafu { name: &name })?;
        tracing::trace!(rows = payload.len(), "query decoded");

        Ok(QueryResult::new(name, response.columns, payload))
    }
}
