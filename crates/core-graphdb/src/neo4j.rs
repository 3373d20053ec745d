use crate::error::{self as db_error, GraphDbResult};
use crate::graph_db::{GraphDb, GraphResponse, Params};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::{OptionExt, ResultExt};
use std::time::Duration;
use url::Url;

pub const DEFAULT_DATABASE: &str = "neo4j";

#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    /// Server root, e.g. `http://localhost:7474`. May carry `user:password@`.
    pub url: String,
    pub database: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:7474".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            user: None,
            password: None,
            request_timeout: None,
        }
    }
}

impl Neo4jConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: Option<String>) -> Self {
        self.user = Some(user.into());
        self.password = password;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Client for the Neo4j transactional HTTP endpoint. Every `run` is a single
/// auto-committed transaction.
pub struct Neo4jHttpDb {
    client: reqwest::Client,
    endpoint: Url,
    credentials: Option<(String, Option<String>)>,
}

impl std::fmt::Debug for Neo4jHttpDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jHttpDb")
            .field("endpoint", &self.endpoint.as_str())
            .field("user", &self.credentials.as_ref().map(|(user, _)| user))
            .finish_non_exhaustive()
    }
}

impl Neo4jHttpDb {
    pub fn new(config: &Neo4jConfig) -> GraphDbResult<Self> {
        let mut url = Url::parse(&config.url).context(db_error::InvalidUrlSnafu {
            url: config.url.clone(),
        })?;

        let embedded = (!url.username().is_empty()).then(|| {
            (
                url.username().to_string(),
                url.password().map(ToString::to_string),
            )
        });
        // Credentials go into the Authorization header, never the request line
        let _ = url.set_username("");
        let _ = url.set_password(None);

        let credentials = match &config.user {
            Some(user) => Some((user.clone(), config.password.clone())),
            None => embedded,
        };

        let base = url.as_str().trim_end_matches('/');
        let endpoint_str = format!("{base}/db/{}/tx/commit", config.database);
        let endpoint =
            Url::parse(&endpoint_str).context(db_error::InvalidUrlSnafu { url: endpoint_str })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context(db_error::HttpClientSnafu)?;

        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct TxRequest<'a> {
    statements: [TxStatement<'a>; 1],
}

#[derive(Serialize)]
struct TxStatement<'a> {
    statement: &'a str,
    parameters: &'a Params,
}

#[derive(Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Deserialize)]
struct TxResult {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Deserialize)]
struct TxRow {
    row: Vec<Value>,
}

#[derive(Deserialize)]
struct TxError {
    code: String,
    message: String,
}

#[async_trait]
impl GraphDb for Neo4jHttpDb {
    #[tracing::instrument(name = "Neo4jHttpDb::run", level = "trace", skip(self, params), err)]
    async fn run(&self, statement: &str, params: &Params) -> GraphDbResult<GraphResponse> {
        let body = TxRequest {
            statements: [TxStatement {
                statement,
                parameters: params,
            }],
        };
        let mut request = self.client.post(self.endpoint.clone()).json(&body);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_ref());
        }

        let response = request.send().await.context(db_error::HttpSnafu)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return db_error::StatusSnafu {
                status: status.as_u16(),
                body,
            }
            .fail();
        }

        let response: TxResponse = response.json().await.context(db_error::HttpSnafu)?;
        if let Some(error) = response.errors.into_iter().next() {
            return db_error::Neo4jSnafu {
                code: error.code,
                message: error.message,
            }
            .fail();
        }
        let result = response
            .results
            .into_iter()
            .next()
            .context(db_error::EmptyResponseSnafu)?;

        Ok(GraphResponse {
            columns: result.columns,
            rows: result.data.into_iter().map(|data| data.row).collect(),
        })
    }
}
