use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use natbot_sidecar::api::{routes::create_router, state::AppState};
use natbot_sidecar::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first so RUST_LOG from .env reaches the filter
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let addr = config.socket_addr()?;
    tracing::info!(
        "Default provider: {} ({})",
        config.provider.as_str(),
        config
            .model_for(config.provider)
            .unwrap_or_else(|| config.provider.default_model())
    );

    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    tracing::info!("NatBot sidecar starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
