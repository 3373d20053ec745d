#![allow(clippy::unwrap_used, clippy::expect_used)]

use core_graphdb::{GraphResponse, MemoryGraphDb};
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use serde_json::{Value, json};

#[derive(Debug)]
pub struct TestHttpError {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap<HeaderValue>,
    pub status: StatusCode,
    pub body: String,
}

pub async fn req(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    payload: String,
) -> reqwest::Response {
    client
        .request(method, url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await
        .expect("Failed to send request")
}

/// Sends a json request and decodes a 200 response into `T`; an empty body
/// decodes as `null`. Any other status is returned as `TestHttpError`.
pub async fn http_req<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    payload: String,
) -> Result<T, TestHttpError> {
    let response = req(client, method.clone(), url, payload).await;
    let status = response.status();
    let headers = response.headers().clone();
    let text = response.text().await.expect("Failed to get response text");
    if status != StatusCode::OK {
        return Err(TestHttpError {
            method,
            url: url.to_string(),
            headers,
            status,
            body: text,
        });
    }
    let text = if text.is_empty() { "null" } else { &text };
    Ok(serde_json::from_str::<T>(text).expect("Failed to parse response"))
}

pub const USER_COLUMNS: [&str; 6] = ["id", "name", "email", "role", "hashedPassword", "salt"];

pub const POST_COLUMNS: [&str; 14] = [
    "author.id",
    "author.name",
    "author.email",
    "id",
    "title",
    "type",
    "body",
    "status",
    "publishDate",
    "upvotes",
    "downvotes",
    "viewCount",
    "createTime",
    "lastModifiedDate",
];

pub fn user_row(id: &str, name: &str) -> Vec<Value> {
    vec![
        json!(id),
        json!(name),
        json!(format!("{name}@example.com")),
        json!("member"),
        json!("hash"),
        json!("salt"),
    ]
}

pub fn post_row(id: &str, author: &str, title: &str) -> Vec<Value> {
    vec![
        json!(author),
        json!("Ann"),
        json!("ann@example.com"),
        json!(id),
        json!(title),
        json!("article"),
        json!("body text"),
        json!("published"),
        json!(1_700_000_000_000_i64),
        json!(3),
        json!(1),
        json!(42),
        json!(1_690_000_000_000_i64),
        Value::Null,
    ]
}

pub fn users_response(rows: Vec<Vec<Value>>) -> GraphResponse {
    rows.into_iter()
        .fold(GraphResponse::new(USER_COLUMNS), GraphResponse::with_row)
}

pub fn posts_response(rows: Vec<Vec<Value>>) -> GraphResponse {
    rows.into_iter()
        .fold(GraphResponse::new(POST_COLUMNS), GraphResponse::with_row)
}

/// Params of the first recorded call of `statement`.
pub fn recorded_params(db: &MemoryGraphDb, statement: &str) -> serde_json::Map<String, Value> {
    db.calls()
        .into_iter()
        .find(|call| call.statement == statement.trim())
        .map(|call| call.params)
        .expect("statement was not run")
}
