pub mod app;
pub mod handlers;

use crate::config::AppConfig;
use crate::database::connection::*;
use anyhow::Result;
use tracing::info;

pub async fn start_server(config: &AppConfig) -> Result<()> {
    let database_url = get_database_url(Some(&config.database.path));
    let db = establish_connection(&database_url).await?;

    // Run migrations
    setup_database(&db).await?;
    info!("Database migrations completed");

    let app = app::create_app_with_options(
        db,
        config.server.cors_origin.as_deref(),
        config.canvas.export_options(),
    )
    .await?;

    let port = config.server.port;
    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  /health                       - Health check");
    info!("  /api-docs/openapi.json        - OpenAPI document");
    info!("  /api/v1/layout                - List (GET) and create (POST) components");
    info!("  /api/v1/layout/:id            - Read, replace and delete one component");
    info!("  /api/v1/layout/:id/position   - Move one component (PATCH)");
    info!("  /api/v1/layout.svg|.csv       - Canvas exports");
}
