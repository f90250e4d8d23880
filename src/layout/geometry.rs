use serde::{Deserialize, Serialize};

use crate::errors::{LayoutError, LayoutResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_from(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Maps pointer coordinates reported by the host surface into canvas space.
///
/// The host reports where the canvas' top-left corner sits on screen and how
/// much it is scaled along each axis; canvas coordinates are obtained by
/// undoing that translation and scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    origin: Point,
    scale_x: f64,
    scale_y: f64,
}

impl CanvasTransform {
    pub fn new(origin: Point, scale_x: f64, scale_y: f64) -> LayoutResult<Self> {
        for (axis, scale) in [("x", scale_x), ("y", scale_y)] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(LayoutError::InvalidTransform(format!(
                    "{} scale must be a positive number, got {}",
                    axis, scale
                )));
            }
        }
        Ok(Self {
            origin,
            scale_x,
            scale_y,
        })
    }

    pub fn identity() -> Self {
        Self {
            origin: Point::default(),
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x) / self.scale_x,
            (screen.y - self.origin.y) / self.scale_y,
        )
    }

    pub fn to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.scale_x + self.origin.x,
            canvas.y * self.scale_y + self.origin.y,
        )
    }
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::identity()
    }
}
