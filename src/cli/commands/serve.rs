use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;

use crate::app::{app, AppState};
use crate::config::AppConfig;
use crate::database::schema;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Skip the startup schema reset")]
    pub skip_init: bool,
}

pub async fn handle(args: ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.skip_init {
        config.init_db_on_startup = false;
    }

    if config.api_key.is_none() {
        tracing::warn!("API_KEY is not set; every protected route will answer 401");
    }

    let state = AppState::mysql(config);
    tracing::info!(config = ?state.config, "starting homeowner-api");

    if state.config.init_db_on_startup {
        schema::initialize_on_startup(state.store.as_ref()).await;
    }

    let bind_addr = format!("0.0.0.0:{}", state.config.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
