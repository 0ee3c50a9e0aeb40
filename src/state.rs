/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone is cheap (Arc inside); nothing in here is mutated after startup
 */
use std::sync::Arc;

use crate::config::Config;
use crate::services::forward::Forwarder;
use crate::services::policy::{Authorizer, RemoteAuthorizer};

/// Per-deployment values the access middleware needs on every request.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub self_origin: String,
    pub proxy_origin: String,
    pub namespace: String,
    pub audience: String,
}

impl GatewaySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            self_origin: config.self_origin.clone(),
            proxy_origin: config.proxy_origin.clone(),
            namespace: config.namespace.clone(),
            audience: config.audience.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<GatewaySettings>,
    pub authorizer: Arc<dyn Authorizer>,
    pub forwarder: Arc<Forwarder>,
}

impl AppState {
    pub fn new(
        gateway: GatewaySettings,
        authorizer: Arc<dyn Authorizer>,
        forwarder: Forwarder,
    ) -> Self {
        Self {
            gateway: Arc::new(gateway),
            authorizer,
            forwarder: Arc::new(forwarder),
        }
    }

    /// Wires the remote authorizer and the forwarder onto one pooled client.
    pub fn from_config(config: &Config, http: reqwest::Client) -> Self {
        let authorizer = RemoteAuthorizer::new(http.clone(), &config.policy_url);
        let forwarder = Forwarder::new(http, config.policy_url.clone());

        Self::new(
            GatewaySettings::from_config(config),
            Arc::new(authorizer),
            forwarder,
        )
    }
}
