//! Pointer input and screen/percent conversion.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::widget::FULL_SCALE;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

/// The screen area the percentage space is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl Viewport {
    /// Create a viewport of `width` x `height` pixels.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }

    /// Check if both dimensions are positive and finite.
    pub fn is_usable(&self) -> bool {
        self.size.width.is_finite()
            && self.size.height.is_finite()
            && self.size.width > 0.0
            && self.size.height > 0.0
    }

    /// Convert a pixel delta into percentage points of the viewport.
    ///
    /// Returns `None` for an unusable viewport.
    pub fn delta_percent(&self, from: Point, to: Point) -> Option<Vec2> {
        if !self.is_usable() {
            return None;
        }
        Some(Vec2::new(
            (to.x - from.x) / self.size.width * FULL_SCALE,
            (to.y - from.y) / self.size.height * FULL_SCALE,
        ))
    }

    /// Convert a screen point into percent coordinates.
    pub fn to_percent(&self, point: Point) -> Option<Point> {
        self.delta_percent(Point::ZERO, point).map(|v| v.to_point())
    }
}
