use crate::error::{self as db_error, GraphDbResult};
use crate::graph_db::{GraphDb, GraphResponse, Params};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Outcome {
    Response(GraphResponse),
    Error(String),
}

#[derive(Debug, Clone)]
struct Script {
    outcome: Outcome,
    latency: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub statement: String,
    pub params: Params,
}

/// Scripted in-process database. Statements are matched by their trimmed text
/// and answered with whatever was registered for them; anything else fails
/// the way a syntax error would.
#[derive(Debug, Default)]
pub struct MemoryGraphDb {
    scripts: DashMap<String, Script>,
    calls: Mutex<Vec<RecordedCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MemoryGraphDb {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_response(self, statement: &str, response: GraphResponse) -> Self {
        self.set_response(statement, response);
        self
    }

    #[must_use]
    pub fn with_error(self, statement: &str, message: impl Into<String>) -> Self {
        self.set_error(statement, message);
        self
    }

    /// Delays every run of an already registered statement.
    #[must_use]
    pub fn with_latency(self, statement: &str, latency: Duration) -> Self {
        if let Some(mut script) = self.scripts.get_mut(statement.trim()) {
            script.latency = Some(latency);
        }
        self
    }

    pub fn set_response(&self, statement: &str, response: GraphResponse) {
        self.scripts.insert(
            statement.trim().to_string(),
            Script {
                outcome: Outcome::Response(response),
                latency: None,
            },
        );
    }

    pub fn set_error(&self, statement: &str, message: impl Into<String>) {
        self.scripts.insert(
            statement.trim().to_string(),
            Script {
                outcome: Outcome::Error(message.into()),
                latency: None,
            },
        );
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn call_count(&self, statement: &str) -> usize {
        let statement = statement.trim();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| call.statement == statement)
            .count()
    }

    /// Highest number of statements that were running at the same time.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphDb for MemoryGraphDb {
    async fn run(&self, statement: &str, params: &Params) -> GraphDbResult<GraphResponse> {
        let statement = statement.trim();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                statement: statement.to_string(),
                params: params.clone(),
            });

        // clone out so no map guard is held across the await below
        let script = self.scripts.get(statement).map(|script| script.clone());

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        let Some(script) = script else {
            return db_error::UnknownStatementSnafu { statement }.fail();
        };
        if let Some(latency) = script.latency {
            tokio::time::sleep(latency).await;
        }
        match script.outcome {
            Outcome::Response(response) => Ok(response),
            Outcome::Error(message) => db_error::ScriptedSnafu { message }.fail(),
        }
    }
}
