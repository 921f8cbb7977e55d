//! Widget model, validation and mutation.
//!
//! - [`model`]: plain data (geometry, constraints, metadata)
//! - [`validate`]: pure invariant checks and constraint clamping
//! - [`service`]: creation and the validated update gate
//! - [`handles`]: drag modes and the handles that start them

mod handles;
mod model;
mod service;
mod validate;

pub use handles::{
    DragMode, Edge, HANDLE_HIT_TOLERANCE, Handle, ParseDragModeError, get_handles, hit_test_handles,
};
pub use model::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, FULL_SCALE, Geometry, Widget, WidgetConfig, WidgetConstraints,
    WidgetCreateOptions, WidgetId, WidgetMetadata, WidgetUpdate,
};
pub use service::{Clock, WidgetService};
pub use validate::{apply_constraints, validate};
