//! Dashboard document and interactive state.
//!
//! [`DashboardDocument`] owns the authoritative [`WidgetCollection`] snapshot
//! plus undo/redo history. [`Dashboard`] wires the interaction controller to
//! the widget service: controller output is validated by the service and only
//! accepted results replace the snapshot.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::{LayoutError, WidgetCollection};
use crate::input::{MouseButton, PointerEvent, Viewport};
use crate::interaction::{ControllerConfig, DragController, WidgetEvent};
use crate::widget::{
    DragMode, HANDLE_HIT_TOLERANCE, Widget, WidgetId, WidgetService, WidgetUpdate,
    hit_test_handles,
};

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// A named, persistable set of widgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// Current widget snapshot.
    pub widgets: WidgetCollection,
    #[serde(skip)]
    undo_stack: Vec<WidgetCollection>,
    #[serde(skip)]
    redo_stack: Vec<WidgetCollection>,
}

impl Default for DashboardDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::with_widgets("Untitled", WidgetCollection::new())
    }

    /// Create a document around an existing snapshot.
    pub fn with_widgets(name: impl Into<String>, widgets: WidgetCollection) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            widgets,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Replace the snapshot, remembering `previous` for undo.
    fn commit(&mut self, next: WidgetCollection) {
        let previous = std::mem::replace(&mut self.widgets, next);
        self.record(previous);
    }

    /// Push a snapshot to the undo stack.
    fn record(&mut self, previous: WidgetCollection) {
        self.undo_stack.push(previous);
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last change. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(snapshot) => {
                let current = std::mem::replace(&mut self.widgets, snapshot);
                self.redo_stack.push(current);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(snapshot) => {
                let current = std::mem::replace(&mut self.widgets, snapshot);
                self.undo_stack.push(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Serialize the document to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a document; every widget is validated on the way in.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Interactive dashboard: document, drag controller and mutation gate.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    document: DashboardDocument,
    controller: DragController,
    service: WidgetService,
    /// Snapshot at the start of the running gesture.
    gesture_origin: Option<WidgetCollection>,
}

impl Dashboard {
    /// Create a dashboard over `document`, edit mode off.
    pub fn new(document: DashboardDocument, viewport: Viewport) -> Self {
        Self::with_service(document, viewport, ControllerConfig::default(), WidgetService::new())
    }

    /// Create a dashboard with explicit controller config and service.
    pub fn with_service(
        document: DashboardDocument,
        viewport: Viewport,
        config: ControllerConfig,
        service: WidgetService,
    ) -> Self {
        Self {
            document,
            controller: DragController::new(viewport, config),
            service,
            gesture_origin: None,
        }
    }

    pub fn document(&self) -> &DashboardDocument {
        &self.document
    }

    /// Current widget snapshot.
    pub fn widgets(&self) -> &WidgetCollection {
        &self.document.widgets
    }

    pub fn service(&self) -> &WidgetService {
        &self.service
    }

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    pub fn edit_mode(&self) -> bool {
        self.controller.edit_mode()
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.controller.set_edit_mode(edit_mode);
    }

    /// Flip edit mode and return the new value.
    pub fn toggle_edit_mode(&mut self) -> bool {
        let edit_mode = !self.controller.edit_mode();
        self.controller.set_edit_mode(edit_mode);
        edit_mode
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.controller.set_viewport(viewport);
    }

    /// Add a widget, or replace the one with the same id.
    pub fn add_widget(&mut self, widget: Widget) -> Result<(), LayoutError> {
        let next = self.document.widgets.insert(widget)?;
        self.replace(next);
        Ok(())
    }

    /// Apply an update event. Returns true if the snapshot changed.
    ///
    /// Unknown ids and rejected geometry leave the snapshot untouched.
    pub fn apply_update(&mut self, update: &WidgetUpdate) -> bool {
        let Some(widget) = self.service.find_widget(&self.document.widgets, update.id) else {
            return false;
        };
        let Some(updated) = self.service.update_widget(widget, update) else {
            return false;
        };
        match self.document.widgets.insert(updated) {
            Ok(next) => {
                self.replace(next);
                true
            }
            Err(err) => {
                log::warn!("failed to commit update: {}", err);
                false
            }
        }
    }

    /// Remove a widget. Returns true if it was present.
    ///
    /// Permissions are not checked here; see [`Dashboard::request_delete`].
    pub fn apply_delete(&mut self, id: WidgetId) -> bool {
        let next = self.service.remove_widget(&self.document.widgets, id);
        if next.same_snapshot(&self.document.widgets) {
            return false;
        }
        self.replace(next);
        true
    }

    /// Route a controller event to the matching mutation.
    pub fn dispatch(&mut self, event: WidgetEvent) -> bool {
        match event {
            WidgetEvent::Updated(update) => self.apply_update(&update),
            WidgetEvent::Deleted(id) => self.apply_delete(id),
        }
    }

    /// Delete a widget if it exists and permits deletion.
    pub fn request_delete(&mut self, id: WidgetId) -> bool {
        match self.controller.request_delete(&self.document.widgets, id) {
            Some(event) => self.dispatch(event),
            None => false,
        }
    }

    /// Find the topmost visible widget and drag mode under `position` (screen pixels).
    pub fn pick(&self, position: Point) -> Option<(WidgetId, DragMode)> {
        let point = self.controller.viewport().to_percent(position)?;
        self.document
            .widgets
            .iter_stacked()
            .rev()
            .filter(|widget| widget.visible)
            .find_map(|widget| {
                hit_test_handles(widget, point, HANDLE_HIT_TOLERANCE).map(|mode| (widget.id, mode))
            })
    }

    /// Start a gesture on widget `id`. Returns false if nothing started.
    pub fn pointer_down(&mut self, id: WidgetId, mode: DragMode, position: Point) -> bool {
        let Some(widget) = self.document.widgets.get(id) else {
            return false;
        };
        if !self.controller.pointer_down(widget, mode, position) {
            return false;
        }
        self.gesture_origin = Some(self.document.widgets.clone());
        true
    }

    /// Feed pointer movement; returns true if the snapshot changed.
    pub fn pointer_move(&mut self, position: Point) -> bool {
        match self.controller.pointer_move(position) {
            Some(update) => self.dispatch(WidgetEvent::Updated(update)),
            None => false,
        }
    }

    /// End the gesture. Returns true if it left a change behind (one undo step).
    pub fn pointer_up(&mut self) -> bool {
        self.controller.pointer_up();
        let Some(origin) = self.gesture_origin.take() else {
            return false;
        };
        if origin.same_snapshot(&self.document.widgets) {
            return false;
        }
        self.document.record(origin);
        true
    }

    /// Handle a raw pointer event. Presses pick their target via [`Dashboard::pick`].
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => match self.pick(position) {
                Some((id, mode)) => self.pointer_down(id, mode, position),
                None => false,
            },
            PointerEvent::Down { .. } => false,
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
        }
    }

    /// Undo the last change; refused while a gesture is running.
    pub fn undo(&mut self) -> bool {
        !self.controller.is_dragging() && self.document.undo()
    }

    /// Redo the last undone change; refused while a gesture is running.
    pub fn redo(&mut self) -> bool {
        !self.controller.is_dragging() && self.document.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    // Inside a gesture the snapshot is swapped without history; the whole
    // gesture becomes one undo step in `pointer_up`.
    fn replace(&mut self, next: WidgetCollection) {
        if self.gesture_origin.is_some() {
            self.document.widgets = next;
        } else {
            self.document.commit(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Geometry, WidgetCreateOptions, WidgetMetadata};

    /// The three-tile layout from the showcase page.
    fn seed() -> WidgetCollection {
        let s = WidgetService::new();
        WidgetCollection::try_from_widgets([
            s.create_widget(
                1,
                WidgetCreateOptions::new()
                    .size(50.0, 40.0)
                    .component("chart")
                    .metadata(WidgetMetadata::titled("Sales Chart")),
            ),
            s.create_widget(
                2,
                WidgetCreateOptions::new()
                    .position(50.0, 0.0)
                    .size(50.0, 40.0)
                    .component("card"),
            ),
            s.create_widget(
                3,
                WidgetCreateOptions::new()
                    .position(0.0, 40.0)
                    .size(100.0, 30.0)
                    .component("stats"),
            ),
        ])
        .unwrap()
    }

    /// 1000x1000 viewport: 10 pixels = 1 percentage point.
    fn dashboard() -> Dashboard {
        let mut d = Dashboard::new(
            DashboardDocument::with_widgets("Demo", seed()),
            Viewport::new(1000.0, 1000.0),
        );
        d.set_edit_mode(true);
        d
    }

    fn geometry(d: &Dashboard, id: WidgetId) -> Geometry {
        d.widgets().get(id).unwrap().geometry()
    }

    #[test]
    fn test_apply_update_replaces_snapshot() {
        let mut d = dashboard();
        let before = d.widgets().clone();

        assert!(d.apply_update(&WidgetUpdate::new(1, Geometry::new(0.0, 0.0, 40.0, 40.0))));
        assert!(!d.widgets().same_snapshot(&before));
        assert_eq!(geometry(&d, 1).width, 40.0);
        assert_eq!(before.get(1).unwrap().width, 50.0);
        let metadata = d.widgets().get(1).unwrap().metadata.clone().unwrap();
        assert!(metadata.updated_at.is_some());
    }

    #[test]
    fn test_rejected_update_keeps_snapshot() {
        let mut d = dashboard();
        let before = d.widgets().clone();

        assert!(!d.apply_update(&WidgetUpdate::new(2, Geometry::new(60.0, 0.0, 50.0, 40.0))));
        assert!(!d.apply_update(&WidgetUpdate::new(9, Geometry::new(0.0, 0.0, 10.0, 10.0))));
        assert!(d.widgets().same_snapshot(&before));
        assert!(!d.can_undo());
    }

    #[test]
    fn test_drag_gesture_commits_through_service() {
        let mut d = dashboard();
        assert!(d.pointer_down(1, DragMode::ResizeRight, Point::new(500.0, 200.0)));
        assert!(d.pointer_move(Point::new(400.0, 200.0)));
        assert!(d.pointer_up());

        assert!((geometry(&d, 1).width - 40.0).abs() < 1e-9);
        assert!(d.can_undo());
    }

    #[test]
    fn test_out_of_bounds_move_is_rejected() {
        let mut d = dashboard();
        d.pointer_down(2, DragMode::Move, Point::new(700.0, 200.0));
        // Widget 2 already touches the right edge.
        assert!(!d.pointer_move(Point::new(800.0, 200.0)));
        assert!(!d.pointer_up());

        assert_eq!(geometry(&d, 2), Geometry::new(50.0, 0.0, 50.0, 40.0));
        assert!(!d.can_undo());
    }

    #[test]
    fn test_gesture_is_one_undo_step() {
        let mut d = dashboard();
        d.pointer_down(3, DragMode::ResizeBottom, Point::new(500.0, 700.0));
        d.pointer_move(Point::new(500.0, 750.0));
        d.pointer_move(Point::new(500.0, 800.0));
        d.pointer_up();
        assert!((geometry(&d, 3).height - 40.0).abs() < 1e-9);

        assert!(d.undo());
        assert_eq!(geometry(&d, 3).height, 30.0);
        assert!(!d.can_undo());

        assert!(d.redo());
        assert!((geometry(&d, 3).height - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_undo_refused_mid_gesture() {
        let mut d = dashboard();
        d.apply_delete(3);
        d.pointer_down(1, DragMode::Move, Point::new(100.0, 100.0));
        assert!(!d.undo());
        d.pointer_up();
        assert!(d.undo());
        assert!(d.widgets().contains(3));
    }

    #[test]
    fn test_edit_mode_gates_gestures() {
        let mut d = dashboard();
        assert!(!d.toggle_edit_mode());
        assert!(!d.pointer_down(1, DragMode::Move, Point::new(100.0, 100.0)));
        assert!(d.toggle_edit_mode());
        assert!(d.pointer_down(1, DragMode::Move, Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_delete_paths() {
        let mut d = dashboard();
        let mut locked = d.widgets().get(2).unwrap().clone();
        locked.locked = true;
        d.add_widget(locked).unwrap();

        assert!(!d.request_delete(2));
        assert!(d.widgets().contains(2));
        assert!(d.request_delete(1));
        assert!(!d.widgets().contains(1));
        assert!(!d.request_delete(1));

        // Direct deletes skip the permission check.
        assert!(d.apply_delete(2));
        assert!(!d.apply_delete(2));
    }

    #[test]
    fn test_add_widget_rejects_invalid() {
        let mut d = dashboard();
        let bad = Widget::new(7, Geometry::new(90.0, 90.0, 20.0, 20.0));
        assert_eq!(d.add_widget(bad), Err(LayoutError::InvalidGeometry(7)));
        assert!(!d.widgets().contains(7));
    }

    #[test]
    fn test_pick_finds_handles_and_bodies() {
        let d = dashboard();
        assert_eq!(d.pick(Point::new(250.0, 200.0)), Some((1, DragMode::Move)));
        assert_eq!(d.pick(Point::new(1000.0, 0.0)), Some((2, DragMode::ResizeTopRight)));
        // Shared corner: the later widget in stacking order wins.
        assert_eq!(d.pick(Point::new(1000.0, 400.0)), Some((3, DragMode::ResizeTopRight)));
        assert_eq!(d.pick(Point::new(500.0, 900.0)), None);
    }

    #[test]
    fn test_pick_prefers_topmost() {
        let mut d = dashboard();
        let mut overlay = Widget::new(8, Geometry::new(10.0, 10.0, 20.0, 20.0));
        overlay.order = 3;
        d.add_widget(overlay).unwrap();
        assert_eq!(d.pick(Point::new(200.0, 200.0)), Some((8, DragMode::Move)));
    }

    #[test]
    fn test_pointer_events_drive_gestures() {
        let mut d = dashboard();
        // Empty area: nothing to pick.
        assert!(!d.handle_pointer_event(PointerEvent::Down {
            position: Point::new(250.0, 800.0),
            button: MouseButton::Left,
        }));

        assert!(d.handle_pointer_event(PointerEvent::Down {
            position: Point::new(250.0, 200.0),
            button: MouseButton::Left,
        }));
        assert!(d.handle_pointer_event(PointerEvent::Move {
            position: Point::new(250.0, 300.0),
        }));
        // Released far away from the widget.
        assert!(d.handle_pointer_event(PointerEvent::Up {
            position: Point::new(0.0, 0.0),
            button: MouseButton::Left,
        }));
        assert!(!d.controller().is_dragging());
        assert!((geometry(&d, 1).top - 10.0).abs() < 1e-9);

        assert!(!d.handle_pointer_event(PointerEvent::Down {
            position: Point::new(250.0, 200.0),
            button: MouseButton::Right,
        }));
    }

    #[test]
    fn test_document_json_round_trip() {
        let d = dashboard();
        let json = d.document().to_json().unwrap();
        let loaded = DashboardDocument::from_json(&json).unwrap();

        assert_eq!(loaded.id, d.document().id);
        assert_eq!(loaded.name, "Demo");
        assert_eq!(&loaded.widgets, d.widgets());
        assert!(!loaded.can_undo());
    }

    #[test]
    fn test_document_rejects_invalid_widgets() {
        let json = concat!(
            r#"{"id":"x","name":"Bad","widgets":"#,
            r#"[{"id":1,"left":90,"top":90,"width":20,"height":20}]}"#,
        );
        assert!(DashboardDocument::from_json(json).is_err());
    }

    #[test]
    fn test_undo_history_is_capped() {
        let mut d = dashboard();
        for i in 0..(MAX_UNDO_HISTORY + 10) {
            let width = 20.0 + (i % 10) as f64;
            d.apply_update(&WidgetUpdate::new(1, Geometry::new(0.0, 0.0, width, 40.0)));
        }
        let mut undone = 0;
        while d.undo() {
            undone += 1;
        }
        assert_eq!(undone, MAX_UNDO_HISTORY);
    }
}
