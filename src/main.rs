//! DeskSOS Server - Binary Entry Point

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use desksos_server::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "desksos_server={level},tower_http={level}",
            level = config.log_level
        ))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if config.is_production() && config.uses_default_secret() {
        warn!("JWT_SECRET is not set; tokens are signed with the development secret");
    }

    let addr = config.bind_addr()?;
    let app = create_router(AppState::shared(config.clone())?);
    let listener = TcpListener::bind(addr).await?;

    info!("Server running on http://{}", addr);
    info!("Environment: {}", config.app_env);
    info!("API documentation available at http://{}/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
