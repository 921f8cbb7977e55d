//! Copy-on-write widget collection.
//!
//! A [`WidgetCollection`] is an immutable snapshot. Every accepted mutation
//! returns a new snapshot and leaves the old one intact, so change detection
//! is a pointer comparison ([`WidgetCollection::same_snapshot`]).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::widget::{Widget, WidgetId, validate};

/// Errors raised when building or extending a collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("widget {0} has invalid geometry")]
    InvalidGeometry(WidgetId),
    #[error("duplicate widget id {0}")]
    DuplicateId(WidgetId),
}

/// Immutable mapping from widget id to widget.
#[derive(Debug, Clone, Default)]
pub struct WidgetCollection {
    widgets: Arc<BTreeMap<WidgetId, Widget>>,
}

impl WidgetCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, rejecting invalid geometry and duplicate ids.
    pub fn try_from_widgets(
        widgets: impl IntoIterator<Item = Widget>,
    ) -> Result<Self, LayoutError> {
        let mut map = BTreeMap::new();
        for widget in widgets {
            if !validate(&widget) {
                return Err(LayoutError::InvalidGeometry(widget.id));
            }
            let id = widget.id;
            if map.insert(id, widget).is_some() {
                return Err(LayoutError::DuplicateId(id));
            }
        }
        Ok(Self {
            widgets: Arc::new(map),
        })
    }

    /// Get a widget by id.
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    /// Check if a widget id is present.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Iterate widgets in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.values()
    }

    /// Widgets back to front: by [`Widget::order`], then by id.
    ///
    /// [`WidgetConfig::z_index`](crate::widget::WidgetConfig::z_index) is
    /// rendering data and does not affect stacking here.
    pub fn iter_stacked(&self) -> impl DoubleEndedIterator<Item = &Widget> {
        let mut widgets: Vec<&Widget> = self.widgets.values().collect();
        widgets.sort_by_key(|w| (w.order, w.id));
        widgets.into_iter()
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Return a snapshot with `widget` added or replacing the same id.
    ///
    /// Invalid widgets are never committed.
    pub fn insert(&self, widget: Widget) -> Result<Self, LayoutError> {
        if !validate(&widget) {
            return Err(LayoutError::InvalidGeometry(widget.id));
        }
        let mut map = (*self.widgets).clone();
        map.insert(widget.id, widget);
        Ok(Self {
            widgets: Arc::new(map),
        })
    }

    /// Return a snapshot without `id`, or this same snapshot if `id` is absent.
    pub fn without(&self, id: WidgetId) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        let mut map = (*self.widgets).clone();
        map.remove(&id);
        Self {
            widgets: Arc::new(map),
        }
    }

    /// Check if two handles refer to the very same snapshot.
    pub fn same_snapshot(&self, other: &WidgetCollection) -> bool {
        Arc::ptr_eq(&self.widgets, &other.widgets)
    }
}

impl PartialEq for WidgetCollection {
    fn eq(&self, other: &Self) -> bool {
        self.same_snapshot(other) || self.widgets == other.widgets
    }
}

impl Serialize for WidgetCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.widgets.values())
    }
}

impl<'de> Deserialize<'de> for WidgetCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let widgets = Vec::<Widget>::deserialize(deserializer)?;
        Self::try_from_widgets(widgets).map_err(D::Error::custom)
    }
}
