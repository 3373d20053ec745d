use crate::error::GraphDbResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Statement parameters, sent to the database as `$name` bindings.
pub type Params = Map<String, Value>;

/// Columns and raw rows returned by one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl GraphResponse {
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_row<I>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.rows.push(row.into_iter().collect());
        self
    }

    /// Each row keyed by its column name. Values past the last column are dropped.
    pub fn records(&self) -> impl Iterator<Item = Map<String, Value>> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect::<Map<String, Value>>()
        })
    }
}

/// Handle to a graph database able to run parameterized Cypher statements.
///
/// Implementations are shared between concurrently running queries and must
/// accept overlapping calls.
#[async_trait]
pub trait GraphDb: std::fmt::Debug + Send + Sync {
    async fn run(&self, statement: &str, params: &Params) -> GraphDbResult<GraphResponse>;
}
