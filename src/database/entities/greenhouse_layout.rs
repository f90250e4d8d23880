use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;
use crate::layout::{ComponentDraft, ComponentStatus, ComponentType, LayoutComponent};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "greenhouse_layout")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub component_type: String,
    pub x_position: f64,
    pub y_position: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub metadata: String,
    pub layer_order: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for LayoutComponent {
    type Error = LayoutError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let component_type = ComponentType::from_str(&model.component_type)?;
        let metadata = serde_json::from_str(&model.metadata)?;
        Ok(LayoutComponent::from_draft(
            model.id,
            ComponentDraft {
                name: model.name,
                component_type,
                x_position: model.x_position,
                y_position: model.y_position,
                width: model.width,
                height: model.height,
                color: model.color,
                status: ComponentStatus::from(model.status),
                metadata,
                layer_order: model.layer_order,
            },
        ))
    }
}
