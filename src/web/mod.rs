//! Browser front end: list, detail, export and cache endpoints.

pub mod handlers;
pub mod models;
pub mod router;
pub mod session;
pub mod state;
pub mod templates;

pub use router::app_router;
pub use state::AppState;

use crate::config::Config;

/// Start the HTTP server on the configured address
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config);
    // Fail at startup on a missing or malformed catalog
    let snapshot = state.cache.get()?;
    tracing::info!(
        "Serving {} devices, photos indexed for {}",
        snapshot.catalog.len(),
        snapshot.photos.len()
    );

    let app = app_router(state, &config.server.static_dir);
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    println!("🧰 Subsidy lookup listening on {} (visit http://127.0.0.1:{})", bind_addr, config.server.port);
    axum::serve(listener, app).await?;
    Ok(())
}
