use axum::http::HeaderMap;
use axum::{middleware::Next, response::Response};
use http::header::{AUTHORIZATION, CONTENT_TYPE, InvalidHeaderValue};
use http::{HeaderName, HeaderValue, Method};
use std::str::FromStr;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Debug, Clone, Copy)]
pub struct RequestMetadata {
    pub request_id: Uuid,
}

/// Tags every request with an id, taken from `x-request-id` when the client
/// sent a valid uuid, and echoes it back in the response headers.
pub async fn add_request_metadata(
    headers: HeaderMap,
    mut request: axum::extract::Request,
    next: Next,
) -> Response {
    let request_id = headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|value| Uuid::from_str(value).ok())
        .unwrap_or_else(Uuid::now_v7);
    request
        .extensions_mut()
        .insert(RequestMetadata { request_id });

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

pub fn make_cors_middleware(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin_value = origin.parse::<HeaderValue>()?;
    Ok(CorsLayer::new()
        .allow_origin(origin_value)
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::HEAD,
            Method::PUT,
        ])
        .allow_headers(vec![AUTHORIZATION, CONTENT_TYPE, REQUEST_ID_HEADER])
        .allow_credentials(true))
}
