//! Snap functionality for aligning block positions to the grid.

use kurbo::{Point, Rect, Size};

/// Grid unit for snapped moves, in canvas pixels.
pub const SNAP_GRID_SIZE: f64 = 10.0;

/// Snap a single coordinate to the nearest multiple of `grid_size`.
pub fn snap_value(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size))
}

/// Clamp a block's top-left corner so a block of `size` stays inside `bounds`.
///
/// Blocks larger than the bounds pin to the top-left edge.
pub fn constrain_position(position: Point, size: Size, bounds: Rect) -> Point {
    let max_x = (bounds.x1 - size.width).max(bounds.x0);
    let max_y = (bounds.y1 - size.height).max(bounds.y0);
    Point::new(
        position.x.clamp(bounds.x0, max_x),
        position.y.clamp(bounds.y0, max_y),
    )
}

/// Snap a block position to the grid while staying inside `bounds`.
///
/// Snapping happens after the bounds clamp; a snapped coordinate that would
/// leave the bounds steps one grid unit back inside so the result is still
/// a grid multiple.
pub fn snap_within(position: Point, size: Size, bounds: Rect, grid_size: f64) -> Point {
    let clamped = constrain_position(position, size, bounds);
    let fit = |value: f64, extent: f64, min: f64, max: f64| {
        let mut snapped = snap_value(value, grid_size);
        if snapped + extent > max && snapped - grid_size >= min {
            snapped -= grid_size;
        }
        if snapped < min && snapped + grid_size + extent <= max {
            snapped += grid_size;
        }
        snapped
    };
    Point::new(
        fit(clamped.x, size.width, bounds.x0, bounds.x1),
        fit(clamped.y, size.height, bounds.y0, bounds.y1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_grid_multiple(value: f64) -> bool {
        (value / SNAP_GRID_SIZE).fract().abs() < 1e-9
    }

    #[test]
    fn test_snap_to_grid() {
        let snapped = snap_to_grid(Point::new(14.9, 15.0), SNAP_GRID_SIZE);
        assert!((snapped.x - 10.0).abs() < f64::EPSILON);
        assert!((snapped.y - 20.0).abs() < f64::EPSILON);

        let negative = snap_to_grid(Point::new(-14.0, -16.0), SNAP_GRID_SIZE);
        assert!((negative.x + 10.0).abs() < f64::EPSILON);
        assert!((negative.y + 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_constrain_position() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let size = Size::new(30.0, 20.0);

        let inside = constrain_position(Point::new(10.0, 10.0), size, bounds);
        assert_eq!(inside, Point::new(10.0, 10.0));

        let clamped = constrain_position(Point::new(90.0, -5.0), size, bounds);
        assert_eq!(clamped, Point::new(70.0, 0.0));
    }

    #[test]
    fn test_snap_within_stays_inside_and_on_grid() {
        let bounds = Rect::new(-2500.0, -2500.0, 2500.0, 2500.0);
        let size = Size::new(303.0, 197.0);

        let snapped = snap_within(Point::new(2400.0, 2399.0), size, bounds, SNAP_GRID_SIZE);
        assert!(is_grid_multiple(snapped.x));
        assert!(is_grid_multiple(snapped.y));
        assert!(snapped.x + size.width <= bounds.x1);
        assert!(snapped.y + size.height <= bounds.y1);
    }

    #[test]
    fn test_snap_within_matches_plain_snap_in_open_space() {
        let bounds = Rect::new(-2500.0, -2500.0, 2500.0, 2500.0);
        let size = Size::new(300.0, 200.0);
        let point = Point::new(123.4, -56.6);

        assert_eq!(
            snap_within(point, size, bounds, SNAP_GRID_SIZE),
            snap_to_grid(point, SNAP_GRID_SIZE)
        );
    }
}
