use serde::Serialize;

use super::component::{ComponentId, LayoutComponent};

/// Radius of the status dot drawn in each component's top-right corner.
pub const STATUS_DOT_RADIUS: f64 = 6.0;

/// Everything needed to draw one component, in canvas coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedComponent {
    pub id: ComponentId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub label: String,
    pub icon: &'static str,
    pub status: String,
    pub status_dot: &'static str,
    pub dot_radius: f64,
    pub dot_x: f64,
    pub dot_y: f64,
    pub label_x: f64,
    pub label_y: f64,
    pub dragging: bool,
}

impl RenderedComponent {
    pub fn from_component(component: &LayoutComponent, dragging: bool) -> Self {
        Self {
            id: component.id(),
            x: component.x_position,
            y: component.y_position,
            width: component.width,
            height: component.height,
            fill: component.color.clone(),
            label: component.name.clone(),
            icon: component.component_type.icon(),
            status: component.status.to_string(),
            status_dot: component.status.dot_color(),
            dot_radius: STATUS_DOT_RADIUS,
            dot_x: component.x_position + component.width - STATUS_DOT_RADIUS * 1.5,
            dot_y: component.y_position + STATUS_DOT_RADIUS * 1.5,
            label_x: component.x_position + component.width / 2.0,
            label_y: component.y_position + component.height / 2.0,
            dragging,
        }
    }
}

/// Paint list for the canvas; later entries are drawn on top.
pub fn render_canvas(
    components: &[LayoutComponent],
    dragged: Option<ComponentId>,
) -> Vec<RenderedComponent> {
    components
        .iter()
        .map(|c| RenderedComponent::from_component(c, dragged == Some(c.id())))
        .collect()
}
