/*
 * Responsibility
 * - Route table
 * - Which routes are guarded (access middleware) and which are relayed
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    forward,
    health::health,
    public::{index, secret, topsecret},
};
use crate::middleware::{auth::access, http, security_headers};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/secret", get(secret))
        .route("/topsecret", get(topsecret));
    let protected = access::apply(protected, state);

    let own = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .merge(protected);
    let own = http::request_id(security_headers::apply(own));

    // Relayed routes bypass the gateway: nothing is added to the request or
    // the response, so the upstream's header set comes back as is.
    let relayed = Router::new()
        .route("/issue", post(forward::issue))
        .route("/login", get(forward::login));

    own.merge(relayed)
}
