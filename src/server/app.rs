use anyhow::Result;
use axum::{
    http::HeaderValue,
    response::Json,
    routing::{get, patch},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use super::handlers::{health, layout};
use crate::export::ExportOptions;
use crate::layout::{ComponentDraft, ComponentType, LayoutComponent};
use crate::services::LayoutService;

#[derive(Clone)]
pub struct AppState {
    pub layout: LayoutService,
    pub export_options: ExportOptions,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        layout::list_components,
        layout::create_component,
        layout::get_component,
        layout::update_component,
        layout::update_position,
        layout::delete_component,
        layout::export_svg,
        layout::export_csv,
    ),
    components(schemas(
        LayoutComponent,
        ComponentDraft,
        ComponentType,
        layout::CreateComponentRequest,
        layout::PositionRequest,
    )),
    tags((name = "layout", description = "Greenhouse layout components"))
)]
pub struct ApiDoc;

pub async fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    create_app_with_options(db, cors_origin, ExportOptions::default()).await
}

pub async fn create_app_with_options(
    db: DatabaseConnection,
    cors_origin: Option<&str>,
    export_options: ExportOptions,
) -> Result<Router> {
    let state = AppState {
        layout: LayoutService::new(db),
        export_options,
    };

    let cors = match cors_origin {
        Some(origin) if origin != "*" => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        // API v1 routes
        .nest("/api/v1", api_v1_routes())
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/layout",
            get(layout::list_components).post(layout::create_component),
        )
        .route("/layout.svg", get(layout::export_svg))
        .route("/layout.csv", get(layout::export_csv))
        .route(
            "/layout/:id",
            get(layout::get_component)
                .put(layout::update_component)
                .delete(layout::delete_component),
        )
        .route("/layout/:id/position", patch(layout::update_position))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
