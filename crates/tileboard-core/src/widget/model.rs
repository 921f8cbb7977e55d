//! Widget data definitions.
//!
//! Widgets are rectangles in a percentage coordinate space where both axes
//! run from 0 to [`FULL_SCALE`]. Everything here is plain data; checks live
//! in [`super::validate`] and mutations in [`super::service`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-assigned widget identifier.
pub type WidgetId = u32;

/// Extent of the percentage coordinate space on both axes.
pub const FULL_SCALE: f64 = 100.0;

/// Default width of a newly created widget.
pub const DEFAULT_WIDTH: f64 = 25.0;
/// Default height of a newly created widget.
pub const DEFAULT_HEIGHT: f64 = 25.0;

/// Position and size of a widget, all in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Create a new geometry.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Right edge (`left + width`).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Optional per-widget size bounds and permission flags.
///
/// An unset field means "unconstrained" for sizes and "permitted" for flags.
/// `Default` leaves every field unset, which makes it convenient for
/// overrides: `WidgetConstraints { min_width: Some(10.0), ..Default::default() }`.
/// The documented defaults are [`WidgetConstraints::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletable: Option<bool>,
}

impl WidgetConstraints {
    /// Constraints attached to every widget built by the service.
    pub const DEFAULT: Self = Self {
        min_width: Some(5.0),
        max_width: Some(FULL_SCALE),
        min_height: Some(5.0),
        max_height: Some(FULL_SCALE),
        resizable: Some(true),
        movable: Some(true),
        deletable: Some(true),
    };

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win.
    pub fn overlay(self, overrides: &WidgetConstraints) -> Self {
        Self {
            min_width: overrides.min_width.or(self.min_width),
            max_width: overrides.max_width.or(self.max_width),
            min_height: overrides.min_height.or(self.min_height),
            max_height: overrides.max_height.or(self.max_height),
            resizable: overrides.resizable.or(self.resizable),
            movable: overrides.movable.or(self.movable),
            deletable: overrides.deletable.or(self.deletable),
        }
    }
}

/// Descriptive fields and audit timestamps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form data owned by the widget's content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl WidgetMetadata {
    /// Metadata with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Presentation hints handed to the rendering layer.
///
/// The engine carries these but never acts on them; in particular no
/// snapping is performed regardless of `snap_to_grid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub grid_size: u32,
    pub snap_to_grid: bool,
    pub z_index: i32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            grid_size: 12,
            snap_to_grid: true,
            z_index: 1,
        }
    }
}

fn default_visible() -> bool {
    true
}

/// A draggable, resizable dashboard tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: WidgetId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Key naming the content the rendering layer should mount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Inputs passed to the mounted content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_inputs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<WidgetConstraints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<WidgetMetadata>,
    #[serde(default)]
    pub config: WidgetConfig,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Blocks move, resize and delete regardless of constraints.
    #[serde(default)]
    pub locked: bool,
    /// Stacking hint; higher values are drawn on top.
    #[serde(default)]
    pub order: i32,
}

impl Widget {
    /// Create a bare widget with the given geometry and no constraints.
    pub fn new(id: WidgetId, geometry: Geometry) -> Self {
        Self {
            id,
            left: geometry.left,
            top: geometry.top,
            width: geometry.width,
            height: geometry.height,
            component: None,
            component_inputs: None,
            constraints: None,
            metadata: None,
            config: WidgetConfig::default(),
            visible: true,
            locked: false,
            order: 0,
        }
    }

    /// Current geometry.
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.left, self.top, self.width, self.height)
    }

    /// Overwrite the four geometry fields.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.left = geometry.left;
        self.top = geometry.top;
        self.width = geometry.width;
        self.height = geometry.height;
    }

    /// Builder-style variant of [`Widget::set_geometry`].
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.set_geometry(geometry);
        self
    }

    /// Whether the widget may be moved.
    pub fn can_move(&self) -> bool {
        !self.locked && self.constraints.and_then(|c| c.movable).unwrap_or(true)
    }

    /// Whether the widget may be resized.
    pub fn can_resize(&self) -> bool {
        !self.locked && self.constraints.and_then(|c| c.resizable).unwrap_or(true)
    }

    /// Whether the widget may be deleted.
    pub fn can_delete(&self) -> bool {
        !self.locked && self.constraints.and_then(|c| c.deletable).unwrap_or(true)
    }

    /// Check if a point (in percent) lies inside the widget.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }
}

/// Position/size change for one widget.
///
/// Emitted by the interaction controller and consumed by
/// [`super::WidgetService::update_widget`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetUpdate {
    pub id: WidgetId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl WidgetUpdate {
    /// Create an update carrying `geometry` for widget `id`.
    pub fn new(id: WidgetId, geometry: Geometry) -> Self {
        Self {
            id,
            left: geometry.left,
            top: geometry.top,
            width: geometry.width,
            height: geometry.height,
        }
    }

    /// Geometry carried by the update.
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.left, self.top, self.width, self.height)
    }
}

/// Options for [`super::WidgetService::create_widget`]. Unset fields take defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetCreateOptions {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub component: Option<String>,
    pub component_inputs: Option<Map<String, Value>>,
    /// Overrides merged over [`WidgetConstraints::DEFAULT`].
    pub constraints: Option<WidgetConstraints>,
    pub metadata: Option<WidgetMetadata>,
    pub config: Option<WidgetConfig>,
}

impl WidgetCreateOptions {
    /// Empty options (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial position.
    pub fn position(mut self, left: f64, top: f64) -> Self {
        self.left = Some(left);
        self.top = Some(top);
        self
    }

    /// Set the initial size.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the content key.
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set constraint overrides.
    pub fn constraints(mut self, constraints: WidgetConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Set the metadata.
    pub fn metadata(mut self, metadata: WidgetMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
