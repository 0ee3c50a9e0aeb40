/*
 * Responsibility
 * - Gate protected routes: credential → (redirect | policy check) → handler
 * - No credential: 302 to the login page, the policy service is not called
 * - Credential present: exactly one /authz call; anything but an allow is 403
 */
use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use super::{credential, redirect};
use crate::error::AppError;
use crate::services::policy::AuthorizationQuery;
use crate::state::AppState;

/// Guards every route already registered on `router`.
///
/// Uses `route_layer`, so unmatched paths still 404 instead of redirecting.
///
/// ```ignore
/// let protected = Router::new().route("/secret", get(secret));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let gateway = &state.gateway;

    let Some(credential) = credential::extract(req.headers()) else {
        tracing::debug!(path = %req.uri().path(), "no credential, redirecting to login");

        // The query string is not part of the return address.
        return redirect::found(&redirect::RedirectTarget {
            self_origin: &gateway.self_origin,
            proxy_origin: &gateway.proxy_origin,
            return_path: req.uri().path(),
            audience: &gateway.audience,
        });
    };

    // Present when served with connect info (see `app::run`).
    let client_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let query = AuthorizationQuery::new(
        credential.as_str(),
        req.method(),
        req.uri().path(),
        &gateway.namespace,
        &gateway.audience,
    )
    .with_client_ip(client_ip.as_deref());

    let verdict = state.authorizer.authorize(&query).await;
    if !verdict.is_allowed() {
        tracing::info!(
            method = %req.method(),
            path = %req.uri().path(),
            client_ip = client_ip.as_deref().unwrap_or("-"),
            "access denied"
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}
