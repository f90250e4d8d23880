use serde_json::json;
use std::error::Error;

use super::ExportOptions;
use crate::layout::render::render_canvas;
use crate::layout::LayoutComponent;

const CANVAS_MARGIN: f64 = 20.0;

/// Draws the canvas as a standalone SVG document. The drawing grows past the
/// configured size when components sit outside it.
pub fn render(
    components: &[LayoutComponent],
    options: &ExportOptions,
) -> Result<String, Box<dyn Error>> {
    let rendered = render_canvas(components, None);

    let width = rendered
        .iter()
        .map(|c| c.x + c.width + CANVAS_MARGIN)
        .fold(options.canvas_width, f64::max);
    let height = rendered
        .iter()
        .map(|c| c.y + c.height + CANVAS_MARGIN)
        .fold(options.canvas_height, f64::max);

    let handlebars = crate::common::get_handlebars();
    let res = handlebars.render_template(
        &get_template(),
        &json!({
            "width": width,
            "height": height,
            "background": options.background,
            "components": rendered,
        }),
    )?;
    Ok(res)
}

pub fn get_template() -> String {
    include_str!("to_svg.hbs").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ComponentDraft, ComponentStatus, ComponentType};

    fn sample() -> Vec<LayoutComponent> {
        vec![
            LayoutComponent::from_draft(
                1,
                ComponentDraft::new("Bed A", ComponentType::Growbed).at(10.0, 10.0),
            ),
            LayoutComponent::from_draft(
                2,
                ComponentDraft::new("Pump <P1>", ComponentType::Pump)
                    .at(200.0, 40.0)
                    .with_status(ComponentStatus::Inactive)
                    .on_layer(1),
            ),
        ]
    }

    #[test]
    fn svg_contains_every_component_in_order() {
        let svg = render(&sample(), &ExportOptions::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        let bed = svg.find("component-1").unwrap();
        let pump = svg.find("component-2").unwrap();
        assert!(bed < pump);
        assert!(svg.contains(r##"fill="#4CAF50""##));
        assert!(svg.contains(r##"fill="#10B981""##));
        assert!(svg.contains(r##"fill="#EF4444""##));
        assert!(svg.contains("Pump &lt;P1&gt;"));
    }

    #[test]
    fn canvas_grows_to_fit_components() {
        let components = vec![LayoutComponent::from_draft(
            1,
            ComponentDraft::new("Far bed", ComponentType::Growbed).at(1500.0, 0.0),
        )];
        let options = ExportOptions::default();
        let svg = render(&components, &options).unwrap();
        assert!(svg.contains(r#"width="1620""#));
        assert!(svg.contains(r#"height="800""#));
    }

    #[test]
    fn faulted_components_get_a_heavier_outline() {
        let components = vec![LayoutComponent::from_draft(
            1,
            ComponentDraft::new("Sensor", ComponentType::Sensor)
                .with_status(ComponentStatus::Error),
        )];
        let svg = render(&components, &ExportOptions::default()).unwrap();
        assert!(svg.contains(r##"stroke="#991B1B" stroke-width="2""##));
    }
}
