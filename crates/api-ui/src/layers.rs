use crate::error::{self as api_error, ApiResult};
use axum::http::HeaderMap;
use axum::{middleware::Next, response::Response};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use snafu::ResultExt;
use std::str::FromStr;
use tower_http::cors::{AllowOrigin, CorsLayer};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy)]
pub struct RequestMetadata {
    pub request_id: Uuid,
}

pub async fn add_request_metadata(
    headers: HeaderMap,
    mut request: axum::extract::Request,
    next: Next,
) -> Response {
    let request_id: Uuid = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|s| Uuid::from_str(s).ok())
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

/// `*` allows any origin, anything else must be a single origin.
pub fn make_cors_middleware(origin: &str) -> ApiResult<CorsLayer> {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        let value = origin
            .parse::<HeaderValue>()
            .context(api_error::InvalidOriginSnafu { origin })?;
        AllowOrigin::exact(value)
    };
    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]))
}
