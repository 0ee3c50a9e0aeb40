//! Bearer credential extraction.
//!
//! Precedence:
//! 1. `Authorization: Bearer <token>` with a non-empty token
//! 2. cookie `x-a3s-token`
//!
//! Nothing else (other headers, query, body) is looked at.
use std::fmt;

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::CookieJar;

pub const TOKEN_COOKIE: &str = "x-a3s-token";

/// Opaque token presented by the caller. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

pub fn extract(headers: &HeaderMap) -> Option<Credential> {
    bearer(headers).or_else(|| cookie(headers)).map(Credential)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
