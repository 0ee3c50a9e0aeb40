//! Factory for the HTTP client used to reach the policy service.
//!
//! One client is built at startup and shared (read-only, pooled) by the
//! authorizer and the forwarder.
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("cannot read trust anchor {path}: {source}")]
    ReadCa {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid trust anchor {path}: {source}")]
    InvalidCa {
        path: PathBuf,
        source: reqwest::Error,
    },
    #[error("http client: {0}")]
    Build(#[from] reqwest::Error),
}

pub fn build_http_client(config: &Config) -> Result<reqwest::Client, ClientBuildError> {
    let mut builder = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .connect_timeout(config.upstream_connect_timeout)
        // Upstream redirects are relayed to the caller, not followed.
        .redirect(reqwest::redirect::Policy::none());

    if let Some(path) = &config.policy_ca_cert_path {
        let cert = load_trust_anchor(path)?;
        builder = builder.tls_built_in_root_certs(false).add_root_certificate(cert);
        tracing::info!(ca = %path.display(), "policy service pinned to configured trust anchor");
    }

    Ok(builder.build()?)
}

fn load_trust_anchor(path: &Path) -> Result<reqwest::Certificate, ClientBuildError> {
    let pem = std::fs::read(path).map_err(|source| ClientBuildError::ReadCa {
        path: path.to_path_buf(),
        source,
    })?;
    reqwest::Certificate::from_pem(&pem).map_err(|source| ClientBuildError::InvalidCa {
        path: path.to_path_buf(),
        source,
    })
}

/// Joins `path` onto the base URL, keeping any path prefix the base carries.
///
/// `https://a3s.example/prefix` + `/authz` → `https://a3s.example/prefix/authz`
pub fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url.set_query(None);
    url.set_fragment(None);
    url
}
