//! Streaming video proxy.
//!
//! Relays the bytes of an arbitrary http(s) resource without caching. Range
//! requests are forwarded so players can seek.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chaguan_shared::time::{now_millis, timestamp_to_cst_rfc3339};

use crate::{
    infrastructure::dto::http::{ProxyHealthDto, ProxyQuery},
    ui::state::AppState,
};

/// Stream `url` back to the client
pub async fn proxy_stream(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProxyQuery>,
    headers: HeaderMap,
) -> Response {
    let url = match reqwest::Url::parse(&query.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        _ => {
            tracing::debug!("Rejecting proxy request for '{}'", query.url);
            return (StatusCode::BAD_REQUEST, "url must be an absolute http(s) URL")
                .into_response();
        }
    };

    let mut request = state.http_client.get(url.clone());
    if let Some(range) = headers.get(header::RANGE) {
        request = request.header(header::RANGE, range.clone());
    }

    let upstream = match request.send().await {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::warn!("Proxy upstream '{}' failed: {}", url, e);
            return (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response();
        }
    };

    let status = upstream.status();
    let mut response_headers = HeaderMap::new();
    for name in [
        header::CONTENT_TYPE,
        header::CONTENT_LENGTH,
        header::CONTENT_RANGE,
        header::ACCEPT_RANGES,
    ] {
        if let Some(value) = upstream.headers().get(&name) {
            response_headers.insert(name, value.clone());
        }
    }
    response_headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    tracing::debug!("Proxying '{}' ({})", url, status);
    let body = Body::from_stream(upstream.bytes_stream());
    (status, response_headers, body).into_response()
}

/// Proxy health endpoint
pub async fn proxy_health() -> Json<ProxyHealthDto> {
    Json(ProxyHealthDto {
        status: "ok".to_string(),
        timestamp: timestamp_to_cst_rfc3339(now_millis()),
    })
}
