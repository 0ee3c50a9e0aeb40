/*
 * Responsibility
 * - tracing / panic hook
 * - Config → shared HTTP client → AppState → Router
 * - Serve over plain TCP, or TLS (optionally mutual) when configured
 */
use std::{net::SocketAddr, panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{api, config::Config, middleware, services::upstream, state::AppState, tls};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,a3s_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        policy = %config.policy_url,
        namespace = %config.namespace,
        audience = %config.audience,
        "starting gateway"
    );

    let http = upstream::build_http_client(&config)?;
    let state = AppState::from_config(&config, http);
    // Connect info feeds the client address into each /authz query.
    let app = build_router(state).into_make_service_with_connect_info::<SocketAddr>();

    match &config.tls {
        Some(settings) => {
            let server_config = tls::server_config(settings)
                .with_context(|| format!("loading {}", settings.cert_path.display()))?;
            let tls_config = RustlsConfig::from_config(Arc::new(server_config));

            tracing::info!(addr = %config.addr, "listening (tls)");
            axum_server::bind_rustls(config.addr, tls_config)
                .serve(app)
                .await?;
        }
        None => {
            tracing::warn!(addr = %config.addr, "listening without TLS");
            let listener = tokio::net::TcpListener::bind(config.addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let router = api::routes(state.clone()).with_state(state);
    middleware::http::apply(router)
}
