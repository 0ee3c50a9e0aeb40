/*
 * Responsibility
 * - POST /issue → policy service /issue
 * - GET /login  → policy service /ui/login.html
 * - Relay only: the payload is never inspected, the response is mirrored as-is
 */
use axum::{
    body::{Body, Bytes},
    extract::{RawQuery, State},
    http::{HeaderMap, Method},
    response::Response,
};

use crate::error::AppError;
use crate::services::forward::ForwardRequest;
use crate::state::AppState;

pub const ISSUE_UPSTREAM: &str = "/issue";
pub const LOGIN_UPSTREAM: &str = "/ui/login.html";

pub async fn issue(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, AppError> {
    relay(
        &state,
        ISSUE_UPSTREAM,
        ForwardRequest {
            method,
            query,
            headers,
            body,
        },
    )
    .await
}

pub async fn login(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, AppError> {
    relay(
        &state,
        LOGIN_UPSTREAM,
        ForwardRequest {
            method,
            query,
            headers,
            body,
        },
    )
    .await
}

async fn relay(
    state: &AppState,
    upstream_path: &'static str,
    req: ForwardRequest,
) -> Result<Response, AppError> {
    let forwarded = state
        .forwarder
        .forward(upstream_path, req)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, upstream = upstream_path, "forwarding failed");
            AppError::from(err)
        })?;

    let mut response = Response::new(Body::from(forwarded.body));
    *response.status_mut() = forwarded.status;
    *response.headers_mut() = forwarded.headers;
    Ok(response)
}
