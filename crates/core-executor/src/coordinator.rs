use crate::error::{self as ex_error, ExecutionError, ExecutionResult, HandlerResult};
use crate::executor::QueryExecutor;
use crate::handlers::single_handler;
use crate::models::{QueryRequest, QueryResult};
use crate::utils::Config;
use core_graphdb::GraphDb;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Per-batch overrides for [`QueryCoordinator`].
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub timeout: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl QueryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Fans a batch of requests out to concurrently running executions and hands
/// the complete result set, in submission order, to a result handler.
///
/// The batch fails fast: the first execution error aborts every execution
/// still running and is returned as is; the handler is not called. Timeouts
/// and cancellation abort the batch the same way. Aborted executions are
/// awaited before returning so none of them outlives the call. Dropping the
/// returned future before it completes aborts every execution still running.
#[derive(Debug, Clone)]
pub struct QueryCoordinator {
    executor: QueryExecutor,
    config: Arc<Config>,
    limiter: Option<Arc<Semaphore>>,
}

impl QueryCoordinator {
    #[must_use]
    pub fn new(db: Arc<dyn GraphDb>, config: Arc<Config>) -> Self {
        let limiter = config
            .max_concurrent_queries
            .filter(|limit| *limit > 0)
            .map(|limit| Arc::new(Semaphore::new(limit)));
        Self {
            executor: QueryExecutor::new(db),
            config,
            limiter,
        }
    }

    #[must_use]
    pub const fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn run_single_query<T>(
        &self,
        request: QueryRequest<T>,
    ) -> ExecutionResult<QueryResult<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.run_concurrent_queries(vec![request], single_handler)
            .await
    }

    pub async fn run_concurrent_queries<T, O, F>(
        &self,
        requests: Vec<QueryRequest<T>>,
        handler: F,
    ) -> ExecutionResult<O>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Vec<QueryResult<T>>) -> HandlerResult<O>,
    {
        self.run_concurrent_queries_with(requests, handler, QueryOptions::default())
            .await
    }

    #[tracing::instrument(
        name = "QueryCoordinator::run_concurrent_queries",
        level = "debug",
        skip_all,
        fields(queries = requests.len()),
        err
    )]
    pub async fn run_concurrent_queries_with<T, O, F>(
        &self,
        requests: Vec<QueryRequest<T>>,
        handler: F,
        options: QueryOptions,
    ) -> ExecutionResult<O>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Vec<QueryResult<T>>) -> HandlerResult<O>,
    {
        let results = self.collect_results(requests, &options).await?;
        handler(results).context(ex_error::AggregationSnafu)
    }

    async fn collect_results<T>(
        &self,
        requests: Vec<QueryRequest<T>>,
        options: &QueryOptions,
    ) -> ExecutionResult<Vec<QueryResult<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = requests.iter().map(|r| r.name().to_string()).collect();
        let mut slots: Vec<Option<QueryResult<T>>> =
            std::iter::repeat_with(|| None).take(requests.len()).collect();
        let mut aborts = AbortOnDrop(Vec::with_capacity(requests.len()));
        let mut running = FuturesUnordered::new();

        // every task owns its request; nothing about a request is shared between tasks
        for (index, request) in requests.into_iter().enumerate() {
            let executor = self.executor.clone();
            let limiter = self.limiter.clone();
            let handle = tokio::spawn(
                async move {
                    let _permit = match limiter {
                        Some(limiter) => limiter.acquire_owned().await.ok(),
                        None => None,
                    };
                    executor.execute(request).await
                }
                .in_current_span(),
            );
            aborts.0.push(handle.abort_handle());
            running.push(async move { (index, handle.await) });
        }

        let timeout = options.timeout.or(self.config.query_timeout);
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        let cancellation = options.cancellation.clone().unwrap_or_default();

        let outcome: ExecutionResult<()> = loop {
            let next = tokio::select! {
                biased;
                () = cancellation.cancelled() => {
                    break ex_error::CancelledSnafu {
                        pending: pending_names(&names, &slots),
                    }
                    .fail();
                }
                () = wait_until(deadline) => {
                    break ex_error::TimeoutSnafu {
                        timeout: timeout.unwrap_or_default(),
                        pending: pending_names(&names, &slots),
                    }
                    .fail();
                }
                next = running.next() => next,
            };
            let Some((index, joined)) = next else {
                break Ok(());
            };
            match joined {
                Ok(Ok(result)) => slots[index] = Some(result),
                Ok(Err(err)) => break Err(err),
                Err(source) => {
                    break Err(ExecutionError::TaskJoin {
                        name: names[index].clone(),
                        source,
                    });
                }
            }
        };

        if let Err(err) = outcome {
            tracing::warn!(error = %err, "aborting query batch");
            aborts.abort_all();
            while running.next().await.is_some() {}
            return Err(err);
        }

        Ok(slots.into_iter().flatten().collect())
    }
}

/// Aborts every spawned execution when the batch goes away, including when
/// the caller drops the future before it completes.
struct AbortOnDrop(Vec<AbortHandle>);

impl AbortOnDrop {
    fn abort_all(&self) {
        for abort in &self.0 {
            abort.abort();
        }
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.abort_all();
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn pending_names<T>(names: &[String], slots: &[Option<QueryResult<T>>]) -> Vec<String> {
    names
        .iter()
        .zip(slots)
        .filter(|(_, slot)| slot.is_none())
        .map(|(name, _)| name.clone())
        .collect()
}
