use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use tracing::{debug, warn};

use crate::database::entities::greenhouse_layout;
use crate::errors::{LayoutError, LayoutResult};
use crate::layout::{ComponentDraft, ComponentId, LayoutComponent, LayoutStore, Position};

/// Layout store backed by the `greenhouse_layout` table.
#[derive(Clone)]
pub struct LayoutService {
    db: DatabaseConnection,
}

impl LayoutService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_component(&self, id: ComponentId) -> LayoutResult<LayoutComponent> {
        self.find_model(id).await?.try_into()
    }

    /// Number of stored rows, including any that fail to parse.
    pub async fn count_components(&self) -> LayoutResult<u64> {
        Ok(greenhouse_layout::Entity::find().count(&self.db).await?)
    }

    async fn find_model(&self, id: ComponentId) -> LayoutResult<greenhouse_layout::Model> {
        greenhouse_layout::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(LayoutError::NotFound(id))
    }
}

fn metadata_json(draft: &ComponentDraft) -> LayoutResult<String> {
    Ok(serde_json::to_string(&draft.metadata)?)
}

#[async_trait]
impl LayoutStore for LayoutService {
    async fn list_components(&self) -> LayoutResult<Vec<LayoutComponent>> {
        let rows = greenhouse_layout::Entity::find()
            .order_by_asc(greenhouse_layout::Column::LayerOrder)
            .order_by_asc(greenhouse_layout::Column::Id)
            .all(&self.db)
            .await?;

        let mut components = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            match LayoutComponent::try_from(row) {
                Ok(component) => components.push(component),
                Err(e) => warn!("Skipping layout row {}: {}", id, e),
            }
        }
        Ok(components)
    }

    async fn insert_component(&self, draft: &ComponentDraft) -> LayoutResult<LayoutComponent> {
        draft.validate()?;
        let now = Utc::now();
        let row = greenhouse_layout::ActiveModel {
            name: Set(draft.name.clone()),
            component_type: Set(draft.component_type.to_string()),
            x_position: Set(draft.x_position),
            y_position: Set(draft.y_position),
            width: Set(draft.width),
            height: Set(draft.height),
            color: Set(draft.color.clone()),
            status: Set(draft.status.to_string()),
            metadata: Set(metadata_json(draft)?),
            layer_order: Set(draft.layer_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = row.insert(&self.db).await?;
        debug!("Inserted layout row {}", row.id);
        row.try_into()
    }

    async fn update_component(
        &self,
        id: ComponentId,
        draft: &ComponentDraft,
    ) -> LayoutResult<LayoutComponent> {
        let mut row: greenhouse_layout::ActiveModel = self.find_model(id).await?.into();
        row.name = Set(draft.name.clone());
        row.component_type = Set(draft.component_type.to_string());
        row.x_position = Set(draft.x_position);
        row.y_position = Set(draft.y_position);
        row.width = Set(draft.width);
        row.height = Set(draft.height);
        row.color = Set(draft.color.clone());
        row.status = Set(draft.status.to_string());
        row.metadata = Set(metadata_json(draft)?);
        row.layer_order = Set(draft.layer_order);
        row.updated_at = Set(Utc::now());

        row.update(&self.db).await?.try_into()
    }

    async fn update_position(
        &self,
        id: ComponentId,
        position: Position,
    ) -> LayoutResult<LayoutComponent> {
        let mut row: greenhouse_layout::ActiveModel = self.find_model(id).await?.into();
        row.x_position = Set(position.x());
        row.y_position = Set(position.y());
        row.updated_at = Set(Utc::now());

        row.update(&self.db).await?.try_into()
    }

    async fn delete_component(&self, id: ComponentId) -> LayoutResult<()> {
        let result = greenhouse_layout::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(LayoutError::NotFound(id));
        }
        debug!("Deleted layout row {}", id);
        Ok(())
    }
}
