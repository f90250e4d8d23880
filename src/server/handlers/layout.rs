use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::errors::LayoutError;
use crate::export::{self, ExportFormat};
use crate::layout::{
    ComponentDraft, ComponentStatus, ComponentType, LayoutComponent, LayoutStore, Position,
};
use crate::server::app::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateComponentRequest {
    pub name: String,
    pub component_type: Option<ComponentType>,
    pub x_position: Option<f64>,
    pub y_position: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color: Option<String>,
    pub status: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    pub layer_order: Option<i32>,
}

impl CreateComponentRequest {
    /// Fills unspecified fields from the component type's defaults.
    pub fn into_draft(self) -> ComponentDraft {
        let mut draft = ComponentDraft::new(
            self.name,
            self.component_type.unwrap_or(ComponentType::Growbed),
        );
        if let Some(x) = self.x_position {
            draft.x_position = x;
        }
        if let Some(y) = self.y_position {
            draft.y_position = y;
        }
        if let Some(width) = self.width {
            draft.width = width;
        }
        if let Some(height) = self.height {
            draft.height = height;
        }
        if let Some(color) = self.color {
            draft.color = color;
        }
        if let Some(status) = self.status {
            draft.status = ComponentStatus::from(status);
        }
        if let Some(metadata) = self.metadata {
            draft.metadata = metadata;
        }
        if let Some(layer_order) = self.layer_order {
            draft.layer_order = layer_order;
        }
        draft
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PositionRequest {
    pub x_position: f64,
    pub y_position: f64,
}

fn error_status(context: &str, err: LayoutError) -> StatusCode {
    match err {
        LayoutError::NotFound(_) => StatusCode::NOT_FOUND,
        LayoutError::Validation(_) | LayoutError::InvalidComponentType(_) => {
            warn!("{}: {}", context, err);
            StatusCode::UNPROCESSABLE_ENTITY
        }
        err if err.is_client_error() => StatusCode::BAD_REQUEST,
        err => {
            error!("{}: {}", context, err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/layout",
    responses(
        (status = 200, description = "All layout components in paint order", body = [LayoutComponent])
    )
)]
pub async fn list_components(
    State(state): State<AppState>,
) -> Result<Json<Vec<LayoutComponent>>, StatusCode> {
    let components = state
        .layout
        .list_components()
        .await
        .map_err(|e| error_status("Failed to list layout", e))?;

    Ok(Json(components))
}

#[utoipa::path(
    post,
    path = "/api/v1/layout",
    request_body = CreateComponentRequest,
    responses(
        (status = 200, description = "Component created", body = LayoutComponent),
        (status = 422, description = "Name missing")
    )
)]
pub async fn create_component(
    State(state): State<AppState>,
    Json(payload): Json<CreateComponentRequest>,
) -> Result<Json<LayoutComponent>, StatusCode> {
    let component = state
        .layout
        .insert_component(&payload.into_draft())
        .await
        .map_err(|e| error_status("Failed to create layout component", e))?;

    Ok(Json(component))
}

#[utoipa::path(
    get,
    path = "/api/v1/layout/{id}",
    params(
        ("id" = i32, Path, description = "Component ID")
    ),
    responses(
        (status = 200, description = "Component found", body = LayoutComponent),
        (status = 404, description = "Component not found")
    )
)]
pub async fn get_component(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LayoutComponent>, StatusCode> {
    let component = state
        .layout
        .get_component(id)
        .await
        .map_err(|e| error_status("Failed to load layout component", e))?;

    Ok(Json(component))
}

#[utoipa::path(
    put,
    path = "/api/v1/layout/{id}",
    params(
        ("id" = i32, Path, description = "Component ID")
    ),
    request_body = ComponentDraft,
    responses(
        (status = 200, description = "Component replaced", body = LayoutComponent),
        (status = 404, description = "Component not found")
    )
)]
pub async fn update_component(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ComponentDraft>,
) -> Result<Json<LayoutComponent>, StatusCode> {
    let component = state
        .layout
        .update_component(id, &payload)
        .await
        .map_err(|e| error_status("Failed to update layout component", e))?;

    Ok(Json(component))
}

#[utoipa::path(
    patch,
    path = "/api/v1/layout/{id}/position",
    params(
        ("id" = i32, Path, description = "Component ID")
    ),
    request_body = PositionRequest,
    responses(
        (status = 200, description = "Component moved; negative coordinates are clamped to 0", body = LayoutComponent),
        (status = 404, description = "Component not found")
    )
)]
pub async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PositionRequest>,
) -> Result<Json<LayoutComponent>, StatusCode> {
    let position = Position::clamped(payload.x_position, payload.y_position);
    let component = state
        .layout
        .update_position(id, position)
        .await
        .map_err(|e| error_status("Failed to move layout component", e))?;

    Ok(Json(component))
}

#[utoipa::path(
    delete,
    path = "/api/v1/layout/{id}",
    params(
        ("id" = i32, Path, description = "Component ID")
    ),
    responses(
        (status = 204, description = "Component deleted"),
        (status = 404, description = "Component not found")
    )
)]
pub async fn delete_component(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, StatusCode> {
    state
        .layout
        .delete_component(id)
        .await
        .map_err(|e| error_status("Failed to delete layout component", e))?;

    Ok(StatusCode::NO_CONTENT)
}

async fn export_layout(state: AppState, format: ExportFormat) -> Result<Response, StatusCode> {
    let components = state
        .layout
        .list_components()
        .await
        .map_err(|e| error_status("Failed to load layout for export", e))?;

    let body = export::render(format, &components, &state.export_options).map_err(|e| {
        error!("Failed to render {:?} export: {}", format, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/layout.svg",
    responses(
        (status = 200, description = "Canvas drawn as SVG", content_type = "image/svg+xml", body = String)
    )
)]
pub async fn export_svg(State(state): State<AppState>) -> Result<Response, StatusCode> {
    export_layout(state, ExportFormat::Svg).await
}

#[utoipa::path(
    get,
    path = "/api/v1/layout.csv",
    responses(
        (status = 200, description = "One CSV row per component", content_type = "text/csv", body = String)
    )
)]
pub async fn export_csv(State(state): State<AppState>) -> Result<Response, StatusCode> {
    export_layout(state, ExportFormat::Csv).await
}
