//! Tileboard Core Library
//!
//! Layout engine for percentage-based dashboards: widget model, geometry
//! validation, the mutation gate, and the pointer-driven drag/resize
//! controller, plus a dashboard shell and persistence.

pub mod collection;
pub mod dashboard;
pub mod input;
pub mod interaction;
#[cfg(not(target_arch = "wasm32"))]
pub mod storage;
pub mod widget;

pub use collection::{LayoutError, WidgetCollection};
pub use dashboard::{Dashboard, DashboardDocument, MAX_UNDO_HISTORY};
pub use input::{MouseButton, PointerEvent, Viewport};
pub use interaction::{
    ControllerConfig, DEFAULT_GRID_CELLS, DragController, DragSession, DragState, WidgetEvent,
};
pub use widget::{
    DragMode, Geometry, Widget, WidgetConfig, WidgetConstraints, WidgetCreateOptions, WidgetId,
    WidgetMetadata, WidgetService, WidgetUpdate,
};
