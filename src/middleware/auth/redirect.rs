//! Login redirect for callers that presented no credential.
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::AppError;

// Everything that would break a `key=value&...` query, or is not valid in a
// URL at all. `:` `/` `?` `@` are legal inside a query component and stay
// readable.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Debug, Clone, Copy)]
pub struct RedirectTarget<'a> {
    pub self_origin: &'a str,
    pub proxy_origin: &'a str,
    // Path of the original request, without its query string.
    pub return_path: &'a str,
    pub audience: &'a str,
}

/// `<self>/login?proxy=<proxy>&redirect=<self>/<path>&audience=<audience>`
pub fn login_url(target: &RedirectTarget<'_>) -> String {
    let origin = target.self_origin.trim_end_matches('/');
    let back = format!("{}/{}", origin, target.return_path.trim_start_matches('/'));

    format!(
        "{}/login?proxy={}&redirect={}&audience={}",
        origin,
        encode(target.proxy_origin.trim_end_matches('/')),
        encode(&back),
        encode(target.audience),
    )
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// `302 Found` to the login page.
pub fn found(target: &RedirectTarget<'_>) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(&login_url(target)).map_err(|err| {
        tracing::error!(error = %err, "login redirect is not a valid header value");
        AppError::Internal
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
