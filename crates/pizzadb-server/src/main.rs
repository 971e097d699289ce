mod api;
mod middleware;
mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState, EnvLookup},
    middleware::TriggerGuard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(pizzadb_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let lookup: EnvLookup = Arc::new(|key: &str| std::env::var(key));

    // Credentials are re-read on every run; this only warns early.
    if let Err(e) = pizzadb_core::build_pipeline_config(lookup.as_ref()) {
        tracing::warn!(error = %e, "pipeline configuration incomplete; runs will fail until it is fixed");
    }

    let _scheduler = scheduler::build_scheduler(&config, Arc::clone(&lookup)).await?;

    let guard = TriggerGuard::from_config(&config)?;
    let app = build_app(AppState { lookup }, guard);

    tracing::info!(addr = %config.bind_addr, env = %config.env, "pizzadb-server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
