//! `POST /authz` against the remote policy service.
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use super::client::{AuthorizationQuery, Authorizer, Verdict};
use crate::services::upstream::endpoint;

pub const AUTHZ_PATH: &str = "/authz";

/// Reasons a decision could not be obtained. These stay inside this module:
/// the caller only ever sees a `Verdict`.
#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("policy service timed out")]
    Timeout,
    #[error("policy service unreachable: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for AuthzError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e)
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteAuthorizer {
    http: reqwest::Client,
    authz_url: Url,
}

impl RemoteAuthorizer {
    pub fn new(http: reqwest::Client, base: &Url) -> Self {
        Self {
            http,
            authz_url: endpoint(base, AUTHZ_PATH),
        }
    }

    async fn check(&self, query: &AuthorizationQuery<'_>) -> Result<Verdict, AuthzError> {
        let res = self
            .http
            .post(self.authz_url.clone())
            .json(query)
            .send()
            .await?;

        Ok(Verdict::from_status(res.status()))
    }
}

#[async_trait]
impl Authorizer for RemoteAuthorizer {
    async fn authorize(&self, query: &AuthorizationQuery<'_>) -> Verdict {
        match self.check(query).await {
            Ok(verdict) => verdict,
            Err(err) => {
                // fail closed
                tracing::warn!(
                    error = %err,
                    resource = query.resource,
                    action = query.action,
                    "authorization call failed"
                );
                Verdict::Denied
            }
        }
    }
}
