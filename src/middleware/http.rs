//! Transport-level layers.
//!
//! `apply` wraps the whole router, relayed routes included, and only adds
//! behavior that never shows up in a relayed exchange: tracing, a body limit
//! and an overall deadline. Request ids are a gateway header, so `request_id`
//! is applied to the gateway's own routes only.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Deadline for a whole exchange. Upstream calls must finish well inside it
/// (`Config::from_env` rejects an upstream timeout that does not).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest body accepted from a client, `/issue` payloads included.
pub const BODY_LIMIT: usize = 1024 * 1024;

pub fn apply(router: Router) -> Router {
    let layers = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<Elapsed>() {
                tracing::warn!("request exceeded {:?}", REQUEST_TIMEOUT);
                StatusCode::REQUEST_TIMEOUT
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

/// Assigns an `x-request-id` (keeping a caller-supplied one) and echoes it on
/// the response.
pub fn request_id<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let header = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(PropagateRequestIdLayer::new(header.clone()))
        .layer(SetRequestIdLayer::new(header, MakeRequestUuid))
}
