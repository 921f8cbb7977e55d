//! Geometry validation and constraint clamping.
//!
//! Both functions are pure. [`apply_constraints`] only clamps sizes and can
//! therefore produce a widget that [`validate`] rejects, e.g. a width clamped
//! up to its minimum while `left` already sits near the right edge. Callers
//! that need a committed-ready widget must validate afterwards.

use super::model::{FULL_SCALE, Widget};

/// Check a widget against the layout invariants and its own size constraints.
///
/// Returns false if any geometry field is not finite, if `left`/`top` fall
/// outside `0..=100`, if `width`/`height` fall outside `(0, 100]`, if the
/// widget overflows the container, or if its size breaks `min_*`/`max_*`.
pub fn validate(widget: &Widget) -> bool {
    let g = widget.geometry();

    if ![g.left, g.top, g.width, g.height].iter().all(|v| v.is_finite()) {
        return false;
    }

    let in_range = (0.0..=FULL_SCALE).contains(&g.left)
        && (0.0..=FULL_SCALE).contains(&g.top)
        && g.width > 0.0
        && g.width <= FULL_SCALE
        && g.height > 0.0
        && g.height <= FULL_SCALE;
    if !in_range {
        return false;
    }

    if let Some(c) = &widget.constraints {
        if c.min_width.is_some_and(|min| g.width < min)
            || c.max_width.is_some_and(|max| g.width > max)
            || c.min_height.is_some_and(|min| g.height < min)
            || c.max_height.is_some_and(|max| g.height > max)
        {
            return false;
        }
    }

    g.right() <= FULL_SCALE && g.bottom() <= FULL_SCALE
}

/// Clamp width/height into the widget's constraint ranges.
///
/// Position is left untouched. Minimums are applied before maximums, so a
/// maximum below the minimum wins. Widgets without constraints are returned
/// unchanged.
pub fn apply_constraints(widget: &Widget) -> Widget {
    let Some(c) = widget.constraints else {
        return widget.clone();
    };

    let mut width = widget.width;
    let mut height = widget.height;

    if let Some(min) = c.min_width {
        width = width.max(min);
    }
    if let Some(max) = c.max_width {
        width = width.min(max);
    }
    if let Some(min) = c.min_height {
        height = height.max(min);
    }
    if let Some(max) = c.max_height {
        height = height.min(max);
    }

    Widget {
        width,
        height,
        ..widget.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Geometry, WidgetConstraints};

    fn bare(left: f64, top: f64, width: f64, height: f64) -> Widget {
        Widget::new(1, Geometry::new(left, top, width, height))
    }

    fn constrained(left: f64, top: f64, width: f64, height: f64) -> Widget {
        let mut w = bare(left, top, width, height);
        w.constraints = Some(WidgetConstraints::DEFAULT);
        w
    }

    #[test]
    fn test_valid_widget() {
        assert!(validate(&constrained(0.0, 0.0, 50.0, 40.0)));
        assert!(validate(&constrained(50.0, 60.0, 50.0, 40.0)));
    }

    #[test]
    fn test_overflow_rejected_regardless_of_other_fields() {
        assert!(!validate(&bare(60.0, 0.0, 41.0, 10.0)));
        assert!(!validate(&bare(0.0, 95.0, 10.0, 6.0)));

        let mut locked = bare(90.0, 0.0, 20.0, 10.0);
        locked.locked = true;
        locked.visible = false;
        assert!(!validate(&locked));
    }

    #[test]
    fn test_ranges() {
        assert!(!validate(&bare(-0.1, 0.0, 10.0, 10.0)));
        assert!(!validate(&bare(0.0, 100.5, 10.0, 10.0)));
        assert!(!validate(&bare(0.0, 0.0, 0.0, 10.0)));
        assert!(!validate(&bare(0.0, 0.0, 10.0, -3.0)));
        assert!(!validate(&bare(0.0, 0.0, 200.0, 10.0)));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(!validate(&bare(f64::NAN, 0.0, 10.0, 10.0)));
        assert!(!validate(&bare(0.0, 0.0, f64::INFINITY, 10.0)));
    }

    #[test]
    fn test_own_constraints_checked() {
        assert!(!validate(&constrained(0.0, 0.0, 4.0, 10.0)));
        assert!(!validate(&constrained(0.0, 0.0, 10.0, 4.9)));
        // Without constraints a tiny widget is fine.
        assert!(validate(&bare(0.0, 0.0, 4.0, 4.0)));

        let mut capped = bare(0.0, 0.0, 60.0, 10.0);
        capped.constraints = Some(WidgetConstraints {
            max_width: Some(50.0),
            ..Default::default()
        });
        assert!(!validate(&capped));
    }

    #[test]
    fn test_apply_constraints_clamps_size_only() {
        let w = constrained(10.0, 10.0, 2.0, 3.0);
        let clamped = apply_constraints(&w);

        assert_eq!(clamped.width, 5.0);
        assert_eq!(clamped.height, 5.0);
        assert_eq!(clamped.left, 10.0);
        assert_eq!(clamped.top, 10.0);
        // Input untouched.
        assert_eq!(w.width, 2.0);
    }

    #[test]
    fn test_apply_constraints_can_still_fail_validation() {
        // Width is clamped into range, but left + width overflows; this is
        // expected and left to the caller.
        let w = constrained(98.0, 98.0, 1.0, 1.0);
        let clamped = apply_constraints(&w);

        assert_eq!(clamped.width, 5.0);
        assert_eq!(clamped.height, 5.0);
        assert!(!validate(&clamped));
    }

    #[test]
    fn test_apply_constraints_without_constraints_is_identity() {
        let w = bare(0.0, 0.0, 300.0, 1.0);
        assert_eq!(apply_constraints(&w), w);
    }

    #[test]
    fn test_max_wins_over_min() {
        let mut w = bare(0.0, 0.0, 1.0, 1.0);
        w.constraints = Some(WidgetConstraints {
            min_width: Some(30.0),
            max_width: Some(20.0),
            ..Default::default()
        });
        assert_eq!(apply_constraints(&w).width, 20.0);
    }
}
