//! Scripted walk through the showcase dashboard.

use kurbo::Point;
use tileboard_core::{
    Dashboard, DragMode, LayoutError, MouseButton, PointerEvent, WidgetCollection,
    WidgetCreateOptions, WidgetMetadata, WidgetService,
};

/// Result of one scripted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub label: &'static str,
    pub changed: bool,
}

/// The showcase layout: a chart and a card side by side over a full-width stats strip.
pub fn seed_layout(service: &WidgetService) -> Result<WidgetCollection, LayoutError> {
    let tile = |title: &str, description: &str, category: &str| WidgetMetadata {
        description: Some(description.to_string()),
        category: Some(category.to_string()),
        ..WidgetMetadata::titled(title)
    };

    WidgetCollection::try_from_widgets([
        service.create_widget(
            1,
            WidgetCreateOptions::new()
                .size(50.0, 40.0)
                .component("chart")
                .metadata(tile("Sales Chart", "Monthly sales data visualization", "charts")),
        ),
        service.create_widget(
            2,
            WidgetCreateOptions::new()
                .position(50.0, 0.0)
                .size(50.0, 40.0)
                .component("card")
                .metadata(tile("User Statistics", "User statistics and metrics", "stats")),
        ),
        service.create_widget(
            3,
            WidgetCreateOptions::new()
                .position(0.0, 40.0)
                .size(100.0, 30.0)
                .component("stats")
                .metadata(tile("Key Metrics", "Revenue, orders, and customer stats", "metrics")),
        ),
    ])
}

/// Screen point for a position given in percent.
fn px(dashboard: &Dashboard, x: f64, y: f64) -> Point {
    let size = dashboard.controller().viewport().size;
    Point::new(x / 100.0 * size.width, y / 100.0 * size.height)
}

/// Press at `from`, drag to `to`, release; all in percent. Returns whether a change was committed.
fn gesture(dashboard: &mut Dashboard, from: (f64, f64), to: (f64, f64)) -> bool {
    let start = px(dashboard, from.0, from.1);
    let end = px(dashboard, to.0, to.1);
    dashboard.handle_pointer_event(PointerEvent::Down {
        position: start,
        button: MouseButton::Left,
    });
    dashboard.handle_pointer_event(PointerEvent::Move { position: end });
    dashboard.handle_pointer_event(PointerEvent::Up {
        position: end,
        button: MouseButton::Left,
    })
}

/// Run the showcase steps against `dashboard`.
pub fn run(dashboard: &mut Dashboard) -> Vec<StepOutcome> {
    let mut outcomes = Vec::new();
    let mut step = |label: &'static str, changed: bool| {
        log::info!("{}: {}", label, if changed { "applied" } else { "no change" });
        outcomes.push(StepOutcome { label, changed });
    };

    step("drag while not editing", gesture(dashboard, (25.0, 20.0), (35.0, 20.0)));

    dashboard.set_edit_mode(true);

    // The chart's right edge coincides with the card's left handle, so address it directly.
    let start = px(dashboard, 50.0, 20.0);
    let end = px(dashboard, 40.0, 20.0);
    dashboard.pointer_down(1, DragMode::ResizeRight, start);
    dashboard.pointer_move(end);
    step("shrink sales chart", dashboard.pointer_up());

    step("push card past right edge", gesture(dashboard, (75.0, 20.0), (85.0, 20.0)));
    step("grow key metrics", gesture(dashboard, (50.0, 70.0), (50.0, 80.0)));
    step("delete key metrics", dashboard.request_delete(3));
    step("undo delete", dashboard.undo());

    dashboard.set_edit_mode(false);
    outcomes
}
