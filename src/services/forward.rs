//! Byte-transparent relay to the policy service.
//!
//! Method, query string, headers and body go out unchanged; status, headers
//! and body come back unchanged. Only hop-by-hop headers (plus `host` and
//! `content-length`, which the transport recomputes) are dropped.
use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, header};
use thiserror::Error;
use url::Url;

use crate::services::upstream::endpoint;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("upstream timed out")]
    Timeout,
    #[error("upstream request failed: {0}")]
    Transport(reqwest::Error),
    #[error("upstream response body unreadable: {0}")]
    Body(reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct Forwarder {
    http: reqwest::Client,
    base: Url,
}

impl Forwarder {
    pub fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    pub async fn forward(
        &self,
        upstream_path: &str,
        req: ForwardRequest,
    ) -> Result<ForwardedResponse, ForwardError> {
        let mut url = endpoint(&self.base, upstream_path);
        url.set_query(req.query.as_deref().filter(|q| !q.is_empty()));

        let res = self
            .http
            .request(req.method, url)
            .headers(end_to_end(&req.headers))
            .body(req.body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ForwardError::Timeout
                } else {
                    ForwardError::Transport(e)
                }
            })?;

        let status = res.status();
        let headers = end_to_end(res.headers());
        let body = res.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ForwardError::Timeout
            } else {
                ForwardError::Body(e)
            }
        })?;

        Ok(ForwardedResponse {
            status,
            headers,
            body,
        })
    }
}

const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
];

/// Copies every header except those scoped to a single connection: the fixed
/// hop-by-hop set plus any header the sender listed in `Connection`.
/// Repeated headers (e.g. several `set-cookie`) are all kept, in order.
fn end_to_end(headers: &HeaderMap) -> HeaderMap {
    let listed = connection_options(headers);

    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let skip = HOP_BY_HOP.contains(name)
            || *name == header::CONTENT_LENGTH
            || name.as_str() == "keep-alive"
            || listed.contains(name);
        if skip {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Header names listed in (possibly repeated) `Connection` headers.
fn connection_options(headers: &HeaderMap) -> Vec<HeaderName> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect()
}
