use anyhow::Result;
use application::ContentApp;
use config::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod routes;

use routes::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    info!("Starting content catalogue API server");
    info!("Storage backend: {}", config.storage_backend);
    info!("Using database: {}", config.database_path);

    let content_app = Arc::new(ContentApp::from_config(&config)?);
    let app = router(AppState { content_app });

    // Run the server
    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("API server listening on http://{}", bind_address);
    info!("   GET    /api/v1/content                - List all content");
    info!("   GET    /api/v1/content/filtered       - Filter by ?title= and ?genre=");
    info!("   GET    /api/v1/content/:id            - Get content");
    info!("   POST   /api/v1/content                - Create content");
    info!("   PATCH  /api/v1/content/:id            - Replace content");
    info!("   DELETE /api/v1/content/:id            - Delete content");
    info!("   POST   /api/v1/content/:id/genre      - Add genres");
    info!("   DELETE /api/v1/content/:id/genre      - Remove genres");
    info!("   GET    /health                        - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}
