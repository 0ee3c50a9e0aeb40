/*
 * Responsibility
 * - Load settings from the environment (.env is honored via dotenvy)
 * - Validate them up front so a bad deployment fails at startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::middleware::http::REQUEST_TIMEOUT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Server-side TLS material. Present only when the gateway terminates TLS itself.
#[derive(Debug, Clone)]
pub struct TlsSettings {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
    // When set, clients must present a certificate signed by this CA.
    pub client_ca_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub self_origin: String,
    pub proxy_origin: String,

    pub policy_url: Url,
    pub namespace: String,
    pub audience: String,

    // Trust anchor for the policy service. Public roots are not consulted when set.
    pub policy_ca_cert_path: Option<PathBuf>,
    pub upstream_timeout: Duration,
    pub upstream_connect_timeout: Duration,

    pub tls: Option<TlsSettings>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 5000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let self_origin = origin_var("GATEWAY_SELF_ORIGIN")?
            .unwrap_or_else(|| "https://localhost:5000".to_string());
        let proxy_origin =
            origin_var("GATEWAY_PROXY_ORIGIN")?.unwrap_or_else(|| self_origin.clone());

        let policy_url = std::env::var("A3S_URL")
            .unwrap_or_else(|_| "https://127.0.0.1:44443".to_string());
        let policy_url = Url::parse(&policy_url).map_err(|_| ConfigError::Invalid("A3S_URL"))?;
        if !matches!(policy_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid("A3S_URL"));
        }

        let namespace = std::env::var("A3S_NAMESPACE").unwrap_or_else(|_| "/testapp".to_string());
        let audience = std::env::var("A3S_AUDIENCE").unwrap_or_else(|_| "testapp".to_string());

        let policy_ca_cert_path = path_var("A3S_CA_CERT");

        let upstream_timeout = seconds_var("UPSTREAM_TIMEOUT_SECONDS", 10)?;
        let upstream_timeout = within_request_timeout("UPSTREAM_TIMEOUT_SECONDS", upstream_timeout)?;
        let upstream_connect_timeout = seconds_var("UPSTREAM_CONNECT_TIMEOUT_SECONDS", 5)?;

        let tls = match (path_var("TLS_CERT"), path_var("TLS_KEY")) {
            (Some(cert_path), Some(key_path)) => Some(TlsSettings {
                cert_path,
                key_path,
                client_ca_path: path_var("TLS_CLIENT_CA"),
            }),
            (Some(_), None) => return Err(ConfigError::Missing("TLS_KEY")),
            (None, Some(_)) => return Err(ConfigError::Missing("TLS_CERT")),
            (None, None) => None,
        };

        Ok(Self {
            addr,
            app_env,
            self_origin,
            proxy_origin,
            policy_url,
            namespace,
            audience,
            policy_ca_cert_path,
            upstream_timeout,
            upstream_connect_timeout,
            tls,
        })
    }
}

fn path_var(key: &'static str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// Zero is rejected.
fn seconds_var(key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    let secs = match std::env::var(key) {
        Ok(s) => s.parse::<u64>().map_err(|_| ConfigError::Invalid(key))?,
        Err(_) => default,
    };
    if secs == 0 {
        return Err(ConfigError::Invalid(key));
    }
    Ok(Duration::from_secs(secs))
}

// An /authz call that outlives the request deadline would surface as 408
// instead of a denial.
fn within_request_timeout(key: &'static str, timeout: Duration) -> Result<Duration, ConfigError> {
    if timeout >= REQUEST_TIMEOUT {
        return Err(ConfigError::Invalid(key));
    }
    Ok(timeout)
}

/// Reads an origin (`scheme://host[:port]`) and strips any trailing slash.
fn origin_var(key: &'static str) -> Result<Option<String>, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };
    let raw = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(raw).map_err(|_| ConfigError::Invalid(key))?;
    if parsed.host_str().is_none() {
        return Err(ConfigError::Invalid(key));
    }
    Ok(Some(raw.to_string()))
}
