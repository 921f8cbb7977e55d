//! Drag/resize interaction controller.
//!
//! Translates pointer movement into live geometry for a single active widget
//! and emits [`WidgetUpdate`]s. The controller never writes to a
//! [`WidgetCollection`]; callers route its events through
//! [`crate::widget::WidgetService::update_widget`].

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::collection::WidgetCollection;
use crate::input::Viewport;
use crate::widget::{DragMode, Edge, FULL_SCALE, Geometry, Widget, WidgetId, WidgetUpdate};

/// Number of grid cells per axis used to derive the resize step.
pub const DEFAULT_GRID_CELLS: u32 = 12;

/// Tunables for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerConfig {
    pub grid_cells: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            grid_cells: DEFAULT_GRID_CELLS,
        }
    }
}

impl ControllerConfig {
    /// Smallest size a resize may produce, in percent (one grid cell).
    pub fn step(&self) -> f64 {
        FULL_SCALE / f64::from(self.grid_cells.max(1))
    }
}

/// Events emitted towards the owner of the collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    Updated(WidgetUpdate),
    Deleted(WidgetId),
}

/// State captured for the duration of one gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub widget_id: WidgetId,
    pub mode: DragMode,
    /// Pointer position at press, in screen pixels.
    pub start_point: Point,
    /// Geometry at press.
    pub initial: Geometry,
    /// Geometry after the latest move.
    pub live: Geometry,
}

impl DragSession {
    /// Start a session for `widget`.
    pub fn new(widget: &Widget, mode: DragMode, start_point: Point) -> Self {
        let initial = widget.geometry();
        Self {
            widget_id: widget.id,
            mode,
            start_point,
            initial,
            live: initial,
        }
    }

    /// Check if the live geometry differs from the initial one.
    pub fn changed(&self) -> bool {
        self.live != self.initial
    }

    /// Recompute live geometry from the initial one plus `delta` (percent).
    ///
    /// Corner modes apply the top/bottom edge first, then left/right.
    pub fn apply(&mut self, delta: Vec2, step: f64) {
        match self.mode {
            DragMode::Move => {
                // Only the lower bound is clamped here; the right and bottom
                // overflow is rejected later by the service.
                self.live.left = (self.initial.left + delta.x).max(0.0);
                self.live.top = (self.initial.top + delta.y).max(0.0);
            }
            mode => {
                if let Some(edge) = mode.vertical_edge() {
                    self.resize_edge(edge, delta.y, step);
                }
                if let Some(edge) = mode.horizontal_edge() {
                    self.resize_edge(edge, delta.x, step);
                }
            }
        }
    }

    // The step floor is a fixed grid cell and duplicates the widget's own
    // min_width/min_height constraint, which the service checks afterwards.
    // Both floors are kept.
    fn resize_edge(&mut self, edge: Edge, d: f64, step: f64) {
        let initial = self.initial;
        match edge {
            Edge::Left => {
                let width = initial.width - d;
                if width > step {
                    self.live.left = (initial.left + d).max(0.0);
                    self.live.width = width;
                }
            }
            Edge::Right => {
                let width = initial.width + d;
                if width > step {
                    self.live.width = width;
                }
            }
            Edge::Top => {
                let height = initial.height - d;
                if height > step {
                    self.live.top = (initial.top + d).max(0.0);
                    self.live.height = height;
                }
            }
            Edge::Bottom => {
                let height = initial.height + d;
                if height > step {
                    self.live.height = height;
                }
            }
        }
    }
}

/// Controller state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Pointer-driven drag/resize state machine for one gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    edit_mode: bool,
    viewport: Viewport,
    config: ControllerConfig,
}

impl DragController {
    /// Create an idle controller with edit mode off.
    pub fn new(viewport: Viewport, config: ControllerConfig) -> Self {
        Self {
            state: DragState::Idle,
            edit_mode: false,
            viewport,
            config,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The active session, if dragging.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Turn edit mode on or off. An active session survives but stops
    /// reacting to movement while edit mode is off.
    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn config(&self) -> ControllerConfig {
        self.config
    }

    /// Start a gesture on `widget`.
    ///
    /// Returns false and leaves the state alone if a gesture is already in
    /// progress (first press wins), if edit mode is off, or if the widget
    /// does not permit the requested move/resize.
    pub fn pointer_down(&mut self, widget: &Widget, mode: DragMode, position: Point) -> bool {
        if let DragState::Dragging(active) = &self.state {
            log::debug!(
                "ignoring press on widget {} while widget {} is being dragged",
                widget.id,
                active.widget_id
            );
            return false;
        }
        if !self.edit_mode {
            return false;
        }

        let permitted = if mode.is_resize() {
            widget.can_resize()
        } else {
            widget.can_move()
        };
        if !permitted {
            log::debug!("widget {} does not permit {}", widget.id, mode);
            return false;
        }

        log::debug!("start {} on widget {}", mode, widget.id);
        self.state = DragState::Dragging(DragSession::new(widget, mode, position));
        true
    }

    /// Update the live geometry for a pointer at `position` (screen pixels).
    ///
    /// Returns the update to feed into the service, or `None` when idle,
    /// when edit mode is off, or when the viewport has no area.
    pub fn pointer_move(&mut self, position: Point) -> Option<WidgetUpdate> {
        if !self.edit_mode {
            return None;
        }
        let step = self.config.step();
        let viewport = self.viewport;
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };

        let delta = viewport.delta_percent(session.start_point, position)?;
        session.apply(delta, step);

        let live = session.live;
        log::trace!(
            "{} widget {}: left={:.2} top={:.2} width={:.2} height={:.2}",
            session.mode,
            session.widget_id,
            live.left,
            live.top,
            live.width,
            live.height
        );
        Some(WidgetUpdate::new(session.widget_id, live))
    }

    /// End the gesture, wherever the pointer is released.
    pub fn pointer_up(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                log::debug!("end {} on widget {}", session.mode, session.widget_id);
                Some(session)
            }
            DragState::Idle => None,
        }
    }

    /// Abandon any gesture, e.g. after focus loss swallowed the release.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.pointer_up()
    }

    /// Ask to delete widget `id`; emits an event only if it exists and may be deleted.
    pub fn request_delete(&self, widgets: &WidgetCollection, id: WidgetId) -> Option<WidgetEvent> {
        widgets
            .get(id)
            .filter(|widget| widget.can_delete())
            .map(|widget| WidgetEvent::Deleted(widget.id))
    }
}
