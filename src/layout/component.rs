use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[cfg(feature = "server")]
use utoipa::ToSchema;

use crate::errors::LayoutError;

pub type ComponentId = i32;

pub const DEFAULT_WIDTH: f64 = 100.0;
pub const DEFAULT_HEIGHT: f64 = 100.0;

/// Greenhouse fixture kinds that can be placed on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Growbed,
    Fishtank,
    Pump,
    Sensor,
    Pipe,
    Valve,
    Filter,
}

impl ComponentType {
    pub const ALL: [ComponentType; 7] = [
        ComponentType::Growbed,
        ComponentType::Fishtank,
        ComponentType::Pump,
        ComponentType::Sensor,
        ComponentType::Pipe,
        ComponentType::Valve,
        ComponentType::Filter,
    ];

    /// Fill color assigned when a component of this type is created or retyped.
    pub fn default_color(self) -> &'static str {
        match self {
            ComponentType::Growbed => "#4CAF50",
            ComponentType::Fishtank => "#2196F3",
            ComponentType::Pump => "#FF9800",
            ComponentType::Sensor => "#9C27B0",
            ComponentType::Pipe => "#795548",
            ComponentType::Valve => "#000000",
            ComponentType::Filter => "#6B7280",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ComponentType::Growbed => "sprout",
            ComponentType::Fishtank => "fish",
            ComponentType::Pump => "zap",
            ComponentType::Sensor => "thermometer",
            ComponentType::Pipe => "pipe",
            ComponentType::Valve => "circle-dot",
            ComponentType::Filter => "filter",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Growbed => "growbed",
            ComponentType::Fishtank => "fishtank",
            ComponentType::Pump => "pump",
            ComponentType::Sensor => "sensor",
            ComponentType::Pipe => "pipe",
            ComponentType::Valve => "valve",
            ComponentType::Filter => "filter",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LayoutError::InvalidComponentType(s.to_string()))
    }
}

/// Operational status of a fixture. Values outside the known set are kept
/// verbatim so a row never fails to load because of its status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentStatus {
    Active,
    Inactive,
    Maintenance,
    Error,
    Unknown(String),
}

impl ComponentStatus {
    /// Color of the status dot drawn in the component's corner.
    pub fn dot_color(&self) -> &'static str {
        match self {
            ComponentStatus::Active => "#10B981",
            ComponentStatus::Inactive => "#EF4444",
            ComponentStatus::Maintenance => "#F59E0B",
            ComponentStatus::Error => "#991B1B",
            ComponentStatus::Unknown(_) => "#6B7280",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ComponentStatus::Active => "active",
            ComponentStatus::Inactive => "inactive",
            ComponentStatus::Maintenance => "maintenance",
            ComponentStatus::Error => "error",
            ComponentStatus::Unknown(raw) => raw,
        }
    }
}

impl Default for ComponentStatus {
    fn default() -> Self {
        ComponentStatus::Active
    }
}

impl From<String> for ComponentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => ComponentStatus::Active,
            "inactive" => ComponentStatus::Inactive,
            "maintenance" => ComponentStatus::Maintenance,
            "error" => ComponentStatus::Error,
            _ => ComponentStatus::Unknown(value),
        }
    }
}

impl From<&str> for ComponentStatus {
    fn from(value: &str) -> Self {
        ComponentStatus::from(value.to_string())
    }
}

impl From<ComponentStatus> for String {
    fn from(status: ComponentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A canvas position whose coordinates are never negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: x.max(0.0),
            y: y.max(0.0),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// The editable fields of a layout component: what the add and edit forms
/// produce and what the store writes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct ComponentDraft {
    pub name: String,
    pub component_type: ComponentType,
    pub x_position: f64,
    pub y_position: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    #[cfg_attr(feature = "server", schema(value_type = String))]
    #[serde(default)]
    pub status: ComponentStatus,
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    #[serde(default = "empty_metadata")]
    pub metadata: Value,
    #[serde(default)]
    pub layer_order: i32,
}

impl ComponentDraft {
    pub fn new(name: impl Into<String>, component_type: ComponentType) -> Self {
        Self {
            name: name.into(),
            component_type,
            x_position: 0.0,
            y_position: 0.0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            color: component_type.default_color().to_string(),
            status: ComponentStatus::Active,
            metadata: empty_metadata(),
            layer_order: 0,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x_position = x;
        self.y_position = y;
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_status(mut self, status: ComponentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn on_layer(mut self, layer_order: i32) -> Self {
        self.layer_order = layer_order;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.name.trim().is_empty() {
            return Err(LayoutError::validation("name is required"));
        }
        Ok(())
    }
}

/// One greenhouse fixture as persisted in the layout store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct LayoutComponent {
    id: ComponentId,
    pub name: String,
    pub component_type: ComponentType,
    pub x_position: f64,
    pub y_position: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub status: ComponentStatus,
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub metadata: Value,
    pub layer_order: i32,
}

impl LayoutComponent {
    /// Binds a store-assigned id to the given field values.
    pub fn from_draft(id: ComponentId, draft: ComponentDraft) -> Self {
        Self {
            id,
            name: draft.name,
            component_type: draft.component_type,
            x_position: draft.x_position,
            y_position: draft.y_position,
            width: draft.width,
            height: draft.height,
            color: draft.color,
            status: draft.status,
            metadata: draft.metadata,
            layer_order: draft.layer_order,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn position(&self) -> Position {
        Position::clamped(self.x_position, self.y_position)
    }

    pub fn move_to(&mut self, position: Position) {
        self.x_position = position.x();
        self.y_position = position.y();
    }

    /// Replaces every editable field; the id is left as assigned.
    pub fn apply(&mut self, draft: ComponentDraft) {
        let id = self.id;
        *self = LayoutComponent::from_draft(id, draft);
    }

    pub fn to_draft(&self) -> ComponentDraft {
        ComponentDraft {
            name: self.name.clone(),
            component_type: self.component_type,
            x_position: self.x_position,
            y_position: self.y_position,
            width: self.width,
            height: self.height,
            color: self.color.clone(),
            status: self.status.clone(),
            metadata: self.metadata.clone(),
            layer_order: self.layer_order,
        }
    }
}

pub(crate) fn empty_metadata() -> Value {
    json!({})
}
