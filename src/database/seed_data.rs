use anyhow::Result;
use chrono::Utc;
use sea_orm::*;
use serde_json::json;
use tracing::info;

use crate::database::entities::greenhouse_layout;
use crate::layout::{ComponentStatus, ComponentType};

/// Populates an empty layout with a small aquaponics greenhouse.
pub async fn create_example_layout(db: &DatabaseConnection) -> Result<u64> {
    let existing = greenhouse_layout::Entity::find().count(db).await?;
    if existing > 0 {
        info!("Layout already has {} components, skipping seed data", existing);
        return Ok(0);
    }

    info!("Creating example greenhouse layout");
    let now = Utc::now();

    let components = vec![
        ("Fish Tank 1", ComponentType::Fishtank, 40.0, 260.0, 180.0, 120.0, ComponentStatus::Active, 0),
        ("Grow Bed A", ComponentType::Growbed, 300.0, 40.0, 240.0, 100.0, ComponentStatus::Active, 0),
        ("Grow Bed B", ComponentType::Growbed, 300.0, 180.0, 240.0, 100.0, ComponentStatus::Maintenance, 0),
        ("Swirl Filter", ComponentType::Filter, 40.0, 120.0, 80.0, 80.0, ComponentStatus::Active, 1),
        ("Sump Pump", ComponentType::Pump, 160.0, 420.0, 60.0, 60.0, ComponentStatus::Active, 1),
        ("Return Line", ComponentType::Pipe, 220.0, 440.0, 320.0, 12.0, ComponentStatus::Active, 1),
        ("Bed Valve", ComponentType::Valve, 280.0, 320.0, 24.0, 24.0, ComponentStatus::Inactive, 2),
        ("pH Probe", ComponentType::Sensor, 190.0, 270.0, 24.0, 24.0, ComponentStatus::Error, 2),
    ];

    let count = components.len() as u64;
    let rows = components
        .into_iter()
        .map(|(name, kind, x, y, width, height, status, layer)| {
            greenhouse_layout::ActiveModel {
                name: Set(name.to_string()),
                component_type: Set(kind.to_string()),
                x_position: Set(x),
                y_position: Set(y),
                width: Set(width),
                height: Set(height),
                color: Set(kind.default_color().to_string()),
                status: Set(status.to_string()),
                metadata: Set(json!({}).to_string()),
                layer_order: Set(layer),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
        })
        .collect::<Vec<_>>();

    greenhouse_layout::Entity::insert_many(rows).exec(db).await?;
    info!("Created {} example layout components", count);
    Ok(count)
}
