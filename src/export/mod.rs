pub mod to_csv;
pub mod to_svg;

use std::error::Error;
use std::str::FromStr;

use crate::layout::LayoutComponent;

/// Options shared by the canvas exporters.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub background: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            canvas_width: 1200.0,
            canvas_height: 800.0,
            background: "#F9FAFB".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Svg,
    Csv,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("Unsupported export format: {}", other)),
        }
    }
}

pub fn render(
    format: ExportFormat,
    components: &[LayoutComponent],
    options: &ExportOptions,
) -> Result<String, Box<dyn Error>> {
    match format {
        ExportFormat::Svg => to_svg::render(components, options),
        ExportFormat::Csv => to_csv::render(components),
    }
}
