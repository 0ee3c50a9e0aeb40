//! Response headers for pages the gateway renders itself: `/`, `/health`,
//! the guarded pages, and the 302/403 answers of the access middleware.
//!
//! Relayed routes never get these; the login page keeps whatever framing and
//! caching policy the policy service chose.

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

// A handler that sets one of these itself wins.
const DEFAULTS: [(&str, &str); 5] = [
    ("x-frame-options", "DENY"),
    ("content-security-policy", "frame-ancestors 'none'"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "no-referrer"),
    // Guarded content and the login redirect both depend on the credential.
    ("cache-control", "no-store"),
];

pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    DEFAULTS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}
