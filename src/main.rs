mod models;
mod handlers;
mod services;
mod middleware;
mod navigator;
mod render;
mod routes;
mod sheets;
mod state;
mod config;
mod errors;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use crate::{
    config::Config,
    state::AppState,
};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load().context("Failed to load configuration")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(config);
    // Warm the credential snapshot; every login page load refreshes it again
    match state.reload_credentials().await {
        Ok(count) => tracing::info!("User data loaded successfully ({} users)", count),
        Err(e) => tracing::error!("Error loading user data: {}", e),
    }

    // Drop task views whose session has gone idle
    let views = state.views.clone();
    let idle = state.config.session_idle();
    tokio::spawn(async move {
        let mut sweep = tokio::time::interval(idle.max(std::time::Duration::from_secs(1)));
        loop {
            sweep.tick().await;
            views.evict_idle().await;
        }
    });

    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
