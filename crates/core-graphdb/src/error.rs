use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum GraphDbError {
    #[snafu(display("Invalid database url {url}: {source}"))]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[snafu(display("Cannot build http client: {source}"))]
    HttpClient { source: reqwest::Error },

    #[snafu(display("Database request failed: {source}"))]
    Http { source: reqwest::Error },

    #[snafu(display("Database responded with status {status}: {body}"))]
    Status { status: u16, body: String },

    #[snafu(display("{code}: {message}"))]
    Neo4j { code: String, message: String },

    #[snafu(display("Database returned no result for the statement"))]
    EmptyResponse,

    #[snafu(display("Unknown statement: {statement}"))]
    UnknownStatement { statement: String },

    #[snafu(display("{message}"))]
    Scripted { message: String },
}

pub type GraphDbResult<T> = std::result::Result<T, GraphDbError>;
