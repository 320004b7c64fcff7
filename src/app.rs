/*
 * Responsibility
 * - Config loading → dependency construction → Router assembly
 * - Router-level middleware (http / cors / security headers)
 * - Start with axum::serve()
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::{cors, http, security_headers};
use crate::services::factory;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins if set, e.g. RUST_LOG=info,image3d_proxy=debug,tower_http=debug
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
        // Surface panics via tracing so they are not lost when stderr is hidden.
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
    let config = Config::from_env().context("failed to load configuration")?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting image3d-proxy in {:?} mode on {} (models in {})",
        config.app_env,
        config.addr,
        config.model_dir.display()
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    let verifier = factory::build_token_verifier(config);
    let store = factory::build_artifact_store(config)
        .await
        .context("failed to open artifact store")?;
    let provider =
        factory::build_model_provider(config).context("failed to build provider client")?;

    Ok(AppState::new(verifier, store, provider))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes(state.clone()).with_state(state);

    let router = security_headers::apply(router);
    let router = cors::apply(router, config);
    http::apply(router, config)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
