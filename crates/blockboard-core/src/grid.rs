//! Decorative background grid geometry.

use kurbo::{Line, Point, Rect};

/// Side length of the square grid layer, in canvas pixels.
pub const GRID_EXTENT: f64 = 5000.0;
/// Spacing between grid lines, in canvas pixels.
pub const GRID_CELL_SIZE: f64 = 100.0;

/// A square line grid centred on the canvas origin.
///
/// The grid doubles as the board bounds: blocks are kept inside its extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub extent: f64,
    pub cell_size: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            extent: GRID_EXTENT,
            cell_size: GRID_CELL_SIZE,
        }
    }
}

impl Grid {
    /// Canvas rectangle covered by the grid.
    pub fn bounds(&self) -> Rect {
        let half = self.extent / 2.0;
        Rect::new(-half, -half, half, half)
    }

    /// Grid lines that intersect `visible`, clipped to the grid bounds.
    ///
    /// Vertical lines come first, then horizontal ones.
    pub fn lines_within(&self, visible: Rect) -> Vec<Line> {
        let bounds = self.bounds();
        let area = bounds.intersect(visible);
        if area.width() <= 0.0 || area.height() <= 0.0 || self.cell_size <= 0.0 {
            return Vec::new();
        }

        // First grid line at or after `min`, counted from the grid edge.
        let first = |origin: f64, min: f64| {
            origin + ((min - origin) / self.cell_size).ceil() * self.cell_size
        };
        let mut lines = Vec::new();

        let mut x = first(bounds.x0, area.x0);
        while x <= area.x1 {
            lines.push(Line::new(Point::new(x, area.y0), Point::new(x, area.y1)));
            x += self.cell_size;
        }

        let mut y = first(bounds.y0, area.y0);
        while y <= area.y1 {
            lines.push(Line::new(Point::new(area.x0, y), Point::new(area.x1, y)));
            y += self.cell_size;
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_centered() {
        let grid = Grid::default();
        assert_eq!(grid.bounds(), Rect::new(-2500.0, -2500.0, 2500.0, 2500.0));
    }

    #[test]
    fn test_lines_within_visible_region() {
        let grid = Grid::default();
        let lines = grid.lines_within(Rect::new(-150.0, -50.0, 250.0, 50.0));

        let vertical: Vec<f64> = lines
            .iter()
            .filter(|l| l.p0.x == l.p1.x)
            .map(|l| l.p0.x)
            .collect();
        assert_eq!(vertical, vec![-100.0, 0.0, 100.0, 200.0]);

        let horizontal: Vec<f64> = lines
            .iter()
            .filter(|l| l.p0.y == l.p1.y)
            .map(|l| l.p0.y)
            .collect();
        assert_eq!(horizontal, vec![0.0]);
    }

    #[test]
    fn test_lines_clipped_to_extent() {
        let grid = Grid::default();
        let lines = grid.lines_within(Rect::new(2000.0, 2000.0, 9000.0, 9000.0));
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(line.p0.x <= 2500.0 && line.p1.x <= 2500.0);
            assert!(line.p0.y <= 2500.0 && line.p1.y <= 2500.0);
        }
    }

    #[test]
    fn test_no_lines_outside_grid() {
        let grid = Grid::default();
        assert!(grid.lines_within(Rect::new(3000.0, 3000.0, 4000.0, 4000.0)).is_empty());
    }
}
