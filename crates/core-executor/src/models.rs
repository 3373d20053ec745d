use core_graphdb::Params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// A named Cypher statement together with its parameters.
///
/// `T` is the shape every returned row is decoded into; the result payload is
/// a `Vec<T>`. Batches mixing row shapes use the default `serde_json::Value`.
pub struct QueryRequest<T = Value> {
    name: String,
    statement: String,
    params: Params,
    shape: PhantomData<fn() -> T>,
}

impl<T> QueryRequest<T> {
    #[must_use]
    pub fn new(name: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statement: statement.into(),
            params: Params::new(),
            shape: PhantomData,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    pub(crate) fn into_parts(self) -> (String, String, Params) {
        (self.name, self.statement, self.params)
    }
}

impl<T> Clone for QueryRequest<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            statement: self.statement.clone(),
            params: self.params.clone(),
            shape: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for QueryRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRequest")
            .field("name", &self.name)
            .field("statement", &self.statement)
            .field("params", &self.params)
            .field("shape", &std::any::type_name::<T>())
            .finish()
    }
}

/// Outcome of one executed [`QueryRequest`], labeled with the request name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult<T = Value> {
    pub name: String,
    pub columns: Vec<String>,
    pub payload: Vec<T>,
}

impl<T> QueryResult<T> {
    #[must_use]
    pub const fn new(name: String, columns: Vec<String>, payload: Vec<T>) -> Self {
        Self {
            name,
            columns,
            payload,
        }
    }
}
