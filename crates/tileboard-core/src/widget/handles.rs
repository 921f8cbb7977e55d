//! Drag modes and the handles that trigger them.

use std::fmt;
use std::str::FromStr;

use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::Widget;

/// Handle hit tolerance, in percentage points.
pub const HANDLE_HIT_TOLERANCE: f64 = 1.5;

/// Edge of a widget's rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// What a drag gesture does to the active widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragMode {
    Move,
    ResizeTop,
    ResizeLeft,
    ResizeRight,
    ResizeBottom,
    ResizeTopLeft,
    ResizeTopRight,
    ResizeBottomLeft,
    ResizeBottomRight,
}

impl DragMode {
    /// All modes, move first.
    pub const ALL: [DragMode; 9] = [
        DragMode::Move,
        DragMode::ResizeTop,
        DragMode::ResizeLeft,
        DragMode::ResizeRight,
        DragMode::ResizeBottom,
        DragMode::ResizeTopLeft,
        DragMode::ResizeTopRight,
        DragMode::ResizeBottomLeft,
        DragMode::ResizeBottomRight,
    ];

    /// Check if this mode changes the widget's size.
    pub fn is_resize(self) -> bool {
        self != DragMode::Move
    }

    /// The top/bottom edge this mode drags, if any.
    pub fn vertical_edge(self) -> Option<Edge> {
        match self {
            DragMode::ResizeTop | DragMode::ResizeTopLeft | DragMode::ResizeTopRight => {
                Some(Edge::Top)
            }
            DragMode::ResizeBottom | DragMode::ResizeBottomLeft | DragMode::ResizeBottomRight => {
                Some(Edge::Bottom)
            }
            _ => None,
        }
    }

    /// The left/right edge this mode drags, if any.
    pub fn horizontal_edge(self) -> Option<Edge> {
        match self {
            DragMode::ResizeLeft | DragMode::ResizeTopLeft | DragMode::ResizeBottomLeft => {
                Some(Edge::Left)
            }
            DragMode::ResizeRight | DragMode::ResizeTopRight | DragMode::ResizeBottomRight => {
                Some(Edge::Right)
            }
            _ => None,
        }
    }

    /// Wire name, e.g. `resize-top-left`.
    pub fn as_str(self) -> &'static str {
        match self {
            DragMode::Move => "move",
            DragMode::ResizeTop => "resize-top",
            DragMode::ResizeLeft => "resize-left",
            DragMode::ResizeRight => "resize-right",
            DragMode::ResizeBottom => "resize-bottom",
            DragMode::ResizeTopLeft => "resize-top-left",
            DragMode::ResizeTopRight => "resize-top-right",
            DragMode::ResizeBottomLeft => "resize-bottom-left",
            DragMode::ResizeBottomRight => "resize-bottom-right",
        }
    }
}

impl fmt::Display for DragMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown drag mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown drag mode: {0}")]
pub struct ParseDragModeError(pub String);

impl FromStr for DragMode {
    type Err = ParseDragModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DragMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseDragModeError(s.to_string()))
    }
}

/// A drag affordance on a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in percent coordinates.
    pub position: Point,
    /// Mode started by pressing this handle.
    pub mode: DragMode,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, mode: DragMode) -> Self {
        Self { position, mode }
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Resize handles for a widget: four corners, then four edge midpoints.
pub fn get_handles(widget: &Widget) -> Vec<Handle> {
    let g = widget.geometry();
    let (x0, y0, x1, y1) = (g.left, g.top, g.right(), g.bottom());
    let (cx, cy) = (x0 + g.width / 2.0, y0 + g.height / 2.0);
    vec![
        Handle::new(Point::new(x0, y0), DragMode::ResizeTopLeft),
        Handle::new(Point::new(x1, y0), DragMode::ResizeTopRight),
        Handle::new(Point::new(x0, y1), DragMode::ResizeBottomLeft),
        Handle::new(Point::new(x1, y1), DragMode::ResizeBottomRight),
        Handle::new(Point::new(cx, y0), DragMode::ResizeTop),
        Handle::new(Point::new(x1, cy), DragMode::ResizeRight),
        Handle::new(Point::new(cx, y1), DragMode::ResizeBottom),
        Handle::new(Point::new(x0, cy), DragMode::ResizeLeft),
    ]
}

/// Find the drag mode for a press at `point` (percent coordinates).
///
/// Handles win over the body; a press inside the body yields [`DragMode::Move`].
pub fn hit_test_handles(widget: &Widget, point: Point, tolerance: f64) -> Option<DragMode> {
    get_handles(widget)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.mode)
        .or_else(|| widget.contains(point.x, point.y).then_some(DragMode::Move))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Geometry;

    fn widget() -> Widget {
        Widget::new(1, Geometry::new(10.0, 10.0, 40.0, 20.0))
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in DragMode::ALL {
            assert_eq!(mode.as_str().parse::<DragMode>(), Ok(mode));
        }
        assert_eq!(
            "resize".parse::<DragMode>(),
            Err(ParseDragModeError("resize".to_string()))
        );
    }

    #[test]
    fn test_mode_serializes_kebab_case() {
        let json = serde_json::to_string(&DragMode::ResizeBottomLeft).unwrap();
        assert_eq!(json, "\"resize-bottom-left\"");
    }

    #[test]
    fn test_corner_edges() {
        assert_eq!(DragMode::ResizeTopLeft.vertical_edge(), Some(Edge::Top));
        assert_eq!(DragMode::ResizeTopLeft.horizontal_edge(), Some(Edge::Left));
        assert_eq!(DragMode::ResizeRight.vertical_edge(), None);
        assert_eq!(DragMode::Move.horizontal_edge(), None);
        assert!(!DragMode::Move.is_resize());
    }

    #[test]
    fn test_handles_layout() {
        let handles = get_handles(&widget());
        assert_eq!(handles.len(), 8);
        assert_eq!(handles[0].position, Point::new(10.0, 10.0));
        assert_eq!(handles[3].position, Point::new(50.0, 30.0));
        assert_eq!(handles[5].position, Point::new(50.0, 20.0));
    }

    #[test]
    fn test_hit_test_prefers_handles() {
        let w = widget();
        assert_eq!(
            hit_test_handles(&w, Point::new(50.5, 30.5), HANDLE_HIT_TOLERANCE),
            Some(DragMode::ResizeBottomRight)
        );
        assert_eq!(
            hit_test_handles(&w, Point::new(10.0, 20.0), HANDLE_HIT_TOLERANCE),
            Some(DragMode::ResizeLeft)
        );
        assert_eq!(
            hit_test_handles(&w, Point::new(25.0, 15.0), HANDLE_HIT_TOLERANCE),
            Some(DragMode::Move)
        );
        assert_eq!(hit_test_handles(&w, Point::new(80.0, 80.0), HANDLE_HIT_TOLERANCE), None);
    }
}
