use api_graph::config::WebConfig;
use clap::{Parser, ValueEnum};
use core_executor::utils::Config as ExecutionConfig;
use core_graphdb::{Neo4jConfig, neo4j::DEFAULT_DATABASE};
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(version, about, long_about=None)]
pub struct CliOpts {
    #[arg(
        long,
        env = "NEO4J_URL",
        default_value = "http://localhost:7474",
        help = "Neo4j HTTP root url, may embed user:password",
        help_heading = "Neo4j Options"
    )]
    pub neo4j_url: String,

    #[arg(
        long,
        env = "NEO4J_DATABASE",
        default_value = DEFAULT_DATABASE,
        help = "Neo4j database name",
        help_heading = "Neo4j Options"
    )]
    pub neo4j_database: String,

    #[arg(
        long,
        env = "NEO4J_USER",
        help = "Neo4j user, overrides credentials embedded in the url",
        help_heading = "Neo4j Options"
    )]
    pub neo4j_user: Option<String>,

    #[arg(
        long,
        env = "NEO4J_PASSWORD",
        hide_env_values = true,
        help = "Neo4j password",
        help_heading = "Neo4j Options"
    )]
    neo4j_password: Option<String>,

    #[arg(
        long,
        env = "NEO4J_REQUEST_TIMEOUT_SECS",
        help = "Timeout of a single Neo4j round trip in seconds",
        help_heading = "Neo4j Options"
    )]
    pub neo4j_request_timeout_secs: Option<u64>,

    #[arg(
        long,
        env = "GRAPHD_HOST",
        default_value = "localhost",
        help = "Host to bind to"
    )]
    pub host: String,

    #[arg(long, env = "GRAPHD_PORT", default_value = "8888", help = "Port to bind to")]
    pub port: u16,

    #[arg(
        long,
        env = "QUERY_TIMEOUT_SECS",
        default_value = "30",
        help = "Deadline for a whole batch of concurrent queries in seconds, 0 disables it"
    )]
    pub query_timeout_secs: u64,

    #[arg(
        long,
        env = "MAX_CONCURRENT_QUERIES",
        help = "Limit of statements running on Neo4j at once across all requests"
    )]
    pub max_concurrent_queries: Option<usize>,

    #[arg(long, env = "CORS_ALLOW_ORIGIN", help = "CORS Allow Origin")]
    pub cors_allow_origin: Option<String>,

    #[arg(
        long,
        value_enum,
        env = "TRACING_LEVEL",
        default_value = "info",
        help = "Tracing level, it can be overrided by *RUST_LOG* env var"
    )]
    pub tracing_level: TracingLevel,
}

impl CliOpts {
    #[must_use]
    pub fn neo4j_config(&self) -> Neo4jConfig {
        let mut config =
            Neo4jConfig::new(self.neo4j_url.clone()).with_database(self.neo4j_database.clone());
        if let Some(user) = &self.neo4j_user {
            config = config.with_credentials(user.clone(), self.neo4j_password.clone());
        }
        if let Some(secs) = self.neo4j_request_timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }

    #[must_use]
    pub fn execution_config(&self) -> ExecutionConfig {
        let mut config = ExecutionConfig::new();
        if self.query_timeout_secs > 0 {
            config = config.with_query_timeout(Duration::from_secs(self.query_timeout_secs));
        }
        if let Some(limit) = self.max_concurrent_queries {
            config = config.with_max_concurrent_queries(limit);
        }
        config
    }

    #[must_use]
    pub fn web_config(&self) -> WebConfig {
        WebConfig {
            host: self.host.clone(),
            port: self.port,
            allow_origin: self.cors_allow_origin.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TracingLevel {
    Off,
    Info,
    Debug,
    Trace,
}

impl From<TracingLevel> for LevelFilter {
    fn from(level: TracingLevel) -> Self {
        match level {
            TracingLevel::Off => Self::OFF,
            TracingLevel::Info => Self::INFO,
            TracingLevel::Debug => Self::DEBUG,
            TracingLevel::Trace => Self::TRACE,
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}
