//! Viewport module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Smallest allowed scale.
pub const MIN_SCALE: f64 = 0.1;
/// Largest allowed scale.
pub const MAX_SCALE: f64 = 5.0;
/// Scale at "100%".
pub const DEFAULT_SCALE: f64 = 1.0;
/// Scale change per toolbar zoom step.
pub const ZOOM_STEP: f64 = 0.1;
/// Scale change per wheel delta unit.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

/// Viewport manages the view transform for the canvas.
///
/// `offset` is the pan in screen pixels and `scale` the zoom factor. A canvas
/// point `p` appears on screen at `offset + p * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current translation offset (pan) in screen pixels.
    pub offset: Vec2,
    scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: DEFAULT_SCALE,
        }
    }
}

impl Viewport {
    /// Create a new viewport at 100% with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scale, always within [`MIN_SCALE`, `MAX_SCALE`].
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the scale, clamped to the allowed range.
    ///
    /// Non-finite requests leave the scale unchanged.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            log::debug!("Ignoring non-finite scale {scale}");
            return;
        }
        self.scale = clamp_scale(scale);
    }

    /// Adjust the scale by a signed amount, clamped to the allowed range.
    pub fn zoom_by(&mut self, amount: f64) {
        self.set_scale(self.scale + amount);
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts canvas coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to canvas coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Convert a canvas rectangle to screen coordinates.
    pub fn canvas_rect_to_screen(&self, rect: Rect) -> Rect {
        self.transform().transform_rect_bbox(rect)
    }

    /// Convert a screen-pixel delta into a canvas-pixel delta.
    pub fn screen_delta_to_canvas(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    /// The canvas point currently shown at the centre of a viewport of the given size.
    pub fn visible_center(&self, viewport_size: Size) -> Point {
        Point::new(
            (-self.offset.x + viewport_size.width / 2.0) / self.scale,
            (-self.offset.y + viewport_size.height / 2.0) / self.scale,
        )
    }

    /// The canvas region visible through a viewport of the given size.
    pub fn visible_rect(&self, viewport_size: Size) -> Rect {
        let top_left = self.screen_to_canvas(Point::ZERO);
        let bottom_right =
            self.screen_to_canvas(Point::new(viewport_size.width, viewport_size.height));
        Rect::from_points(top_left, bottom_right)
    }

    /// Pan the viewport by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Fit the viewport to show the given bounding box.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport_size: Size, padding: f64) {
        if bounds.is_zero_area() {
            self.set_scale(DEFAULT_SCALE);
            return;
        }

        let padded_viewport = Size::new(
            (viewport_size.width - padding * 2.0).max(1.0),
            (viewport_size.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded_viewport.width / bounds.width();
        let scale_y = padded_viewport.height / bounds.height();
        self.set_scale(scale_x.min(scale_y));

        // Center the bounds in the viewport
        let bounds_center = bounds.center();
        self.offset = Vec2::new(
            viewport_size.width / 2.0 - bounds_center.x * self.scale,
            viewport_size.height / 2.0 - bounds_center.y * self.scale,
        );
    }
}

/// Clamp a scale to [`MIN_SCALE`, `MAX_SCALE`].
pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}
