// ==========================================
// BQC Generator - HTTP server entry point
// ==========================================
// Config from environment, state over SQLite, axum router
// ==========================================

use anyhow::Context;
use bqc_generator::app::{build_router, AppState};
use bqc_generator::config::AppConfig;
use bqc_generator::{i18n, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", bqc_generator::APP_NAME);
    tracing::info!("version: {}", bqc_generator::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env();
    i18n::set_locale(&config.locale);
    tracing::info!(
        bind_addr = %config.bind_addr,
        db_path = %config.db_path,
        locale = %i18n::current_locale(),
        max_body_bytes = config.max_body_bytes,
        "configuration loaded"
    );

    let state = AppState::new(&config).map_err(anyhow::Error::msg)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.bind_addr))?;
    tracing::info!("listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
