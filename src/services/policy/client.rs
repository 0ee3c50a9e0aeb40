//! Authorization client interface used by the access middleware.
use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use serde::Serialize;

/// One question put to the policy service. Built per request, never stored.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthorizationQuery<'a> {
    pub token: &'a str,
    pub action: &'a str,
    pub resource: &'a str,
    pub namespace: &'a str,
    pub audience: &'a str,
    /// Address the request came from, for network-restricted tokens.
    #[serde(rename = "clientIP", skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<&'a str>,
}

impl<'a> AuthorizationQuery<'a> {
    pub fn new(
        token: &'a str,
        method: &'a Method,
        path: &'a str,
        namespace: &'a str,
        audience: &'a str,
    ) -> Self {
        Self {
            token,
            action: method.as_str(),
            resource: path,
            namespace,
            audience,
            client_ip: None,
        }
    }

    pub fn with_client_ip(mut self, client_ip: Option<&'a str>) -> Self {
        self.client_ip = client_ip;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Denied,
}

impl Verdict {
    /// Only `204 No Content` grants access. Every other status is a denial.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::NO_CONTENT {
            Self::Allowed
        } else {
            Self::Denied
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Renders an allow/deny decision for a query.
///
/// Implementations are infallible from the caller's point of view: any
/// failure to reach a decision must come back as `Verdict::Denied`.
#[async_trait]
pub trait Authorizer: Send + Sync + 'static {
    async fn authorize(&self, query: &AuthorizationQuery<'_>) -> Verdict;
}
