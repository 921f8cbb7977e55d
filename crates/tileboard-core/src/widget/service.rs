//! Widget creation, update and removal.

use chrono::{DateTime, Utc};

use super::model::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, Widget, WidgetConstraints, WidgetCreateOptions, WidgetId,
    WidgetUpdate,
};
use super::validate::{apply_constraints, validate};
use crate::collection::WidgetCollection;

/// Source of "now" for metadata timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// Stateless gate for widget mutations.
///
/// Every geometry change coming out of the interaction controller must pass
/// through [`WidgetService::update_widget`] before it is committed.
/// Permission checks (`can_*`) are advisory: `update_widget` and
/// `remove_widget` do not consult them.
#[derive(Debug, Clone, Copy)]
pub struct WidgetService {
    clock: Clock,
}

impl Default for WidgetService {
    fn default() -> Self {
        Self { clock: Utc::now }
    }
}

impl WidgetService {
    /// Create a service stamping wall-clock time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with a custom clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    /// Build a widget from `options` merged over the defaults.
    ///
    /// The result is not validated; fixtures may deliberately be invalid.
    pub fn create_widget(&self, id: WidgetId, options: WidgetCreateOptions) -> Widget {
        let constraints = match &options.constraints {
            Some(overrides) => WidgetConstraints::DEFAULT.overlay(overrides),
            None => WidgetConstraints::DEFAULT,
        };
        Widget {
            id,
            left: options.left.unwrap_or(0.0),
            top: options.top.unwrap_or(0.0),
            width: options.width.unwrap_or(DEFAULT_WIDTH),
            height: options.height.unwrap_or(DEFAULT_HEIGHT),
            component: options.component,
            component_inputs: options.component_inputs,
            constraints: Some(constraints),
            metadata: options.metadata,
            config: options.config.unwrap_or_default(),
            visible: true,
            locked: false,
            order: 0,
        }
    }

    /// See [`validate`].
    pub fn validate_widget(&self, widget: &Widget) -> bool {
        validate(widget)
    }

    /// See [`apply_constraints`].
    pub fn apply_constraints(&self, widget: &Widget) -> Widget {
        apply_constraints(widget)
    }

    /// Apply the geometry in `update` to a copy of `widget`.
    ///
    /// Stamps `metadata.updated_at` when metadata is present. Returns `None`
    /// if the candidate fails validation; `widget` itself is never modified.
    /// The id carried by `update` is not consulted.
    pub fn update_widget(&self, widget: &Widget, update: &WidgetUpdate) -> Option<Widget> {
        let mut candidate = widget.clone().with_geometry(update.geometry());
        if let Some(metadata) = candidate.metadata.as_mut() {
            metadata.updated_at = Some((self.clock)());
        }

        if !validate(&candidate) {
            log::debug!(
                "rejected update for widget {}: left={} top={} width={} height={}",
                widget.id,
                update.left,
                update.top,
                update.width,
                update.height
            );
            return None;
        }
        Some(candidate)
    }

    /// Find a widget by id.
    pub fn find_widget<'a>(
        &self,
        widgets: &'a WidgetCollection,
        id: WidgetId,
    ) -> Option<&'a Widget> {
        widgets.get(id)
    }

    /// Return `widgets` without `id`; the same snapshot if `id` is absent.
    pub fn remove_widget(&self, widgets: &WidgetCollection, id: WidgetId) -> WidgetCollection {
        widgets.without(id)
    }

    /// See [`Widget::can_move`].
    pub fn can_move_widget(&self, widget: &Widget) -> bool {
        widget.can_move()
    }

    /// See [`Widget::can_resize`].
    pub fn can_resize_widget(&self, widget: &Widget) -> bool {
        widget.can_resize()
    }

    /// See [`Widget::can_delete`].
    pub fn can_delete_widget(&self, widget: &Widget) -> bool {
        widget.can_delete()
    }
}
