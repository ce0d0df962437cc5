use anyhow::Context;
use tracing_subscriber::EnvFilter;

use beauty_rec_web::api::{create_router, AppState};
use beauty_rec_web::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,beauty_rec_web=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;
    let addr = config.bind_addr();

    tracing::info!(
        recommender_url = %config.recommender_url,
        timeout_secs = config.request_timeout_secs,
        "Loaded configuration"
    );

    let state = AppState::from_config(config).context("Failed to build HTTP client")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Server running");

    axum::serve(listener, app).await?;
    Ok(())
}
