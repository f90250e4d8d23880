use csv::Writer;
use std::error::Error;

use crate::layout::LayoutComponent;

pub fn render(components: &[LayoutComponent]) -> Result<String, Box<dyn Error>> {
    let mut wtr = Writer::from_writer(vec![]);

    wtr.write_record([
        "id",
        "name",
        "component_type",
        "x_position",
        "y_position",
        "width",
        "height",
        "color",
        "status",
        "layer_order",
        "metadata",
    ])?;

    for component in components {
        wtr.write_record(&[
            component.id().to_string(),
            component.name.clone(),
            component.component_type.to_string(),
            component.x_position.to_string(),
            component.y_position.to_string(),
            component.width.to_string(),
            component.height.to_string(),
            component.color.clone(),
            component.status.to_string(),
            component.layer_order.to_string(),
            component.metadata.to_string(),
        ])?;
    }

    let data = wtr.into_inner()?;
    let csv_string = String::from_utf8(data)?;

    Ok(csv_string)
}
