use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Upper bound for a whole batch of concurrent queries.
    pub query_timeout: Option<Duration>,
    /// How many statements of one coordinator may run on the database at once.
    pub max_concurrent_queries: Option<usize>,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn with_max_concurrent_queries(mut self, limit: usize) -> Self {
        self.max_concurrent_queries = Some(limit);
        self
    }
}
