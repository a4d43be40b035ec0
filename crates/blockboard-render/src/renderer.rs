//! Renderer trait abstraction.

use blockboard_core::{Grid, Viewport};
use kurbo::{Affine, Rect, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Colors of the canvas layer for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasColors {
    /// Clear color behind everything.
    pub background: Color,
    /// Grid line color.
    pub grid: Color,
}

impl CanvasColors {
    /// Light theme: slate-100 background with #ddd lines.
    pub const LIGHT: Self = Self {
        background: Color::from_rgba8(241, 245, 249, 255),
        grid: Color::from_rgba8(221, 221, 221, 255),
    };

    /// Dark theme: slate-900 background with slate-700 lines.
    pub const DARK: Self = Self {
        background: Color::from_rgba8(15, 23, 42, 255),
        grid: Color::from_rgba8(51, 65, 85, 255),
    };

    /// Palette for the given effective theme.
    pub fn for_theme(dark_mode: bool) -> Self {
        if dark_mode { Self::DARK } else { Self::LIGHT }
    }
}

impl Default for CanvasColors {
    fn default() -> Self {
        Self::LIGHT
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Current pan/zoom.
    pub viewport: &'a Viewport,
    /// Grid geometry.
    pub grid: &'a Grid,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Canvas colors.
    pub colors: CanvasColors,
    /// Whether to draw grid lines.
    pub show_grid: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(viewport: &'a Viewport, grid: &'a Grid, viewport_size: Size) -> Self {
        Self {
            viewport,
            grid,
            viewport_size,
            scale_factor: 1.0,
            colors: CanvasColors::default(),
            show_grid: true,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the canvas colors.
    pub fn with_colors(mut self, colors: CanvasColors) -> Self {
        self.colors = colors;
        self
    }

    /// Show or hide the grid.
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    /// Canvas-to-device transform: the viewport transform followed by HiDPI scaling.
    pub fn device_transform(&self) -> Affine {
        Affine::scale(self.scale_factor) * self.viewport.transform()
    }

    /// Canvas region currently visible.
    pub fn visible_canvas_rect(&self) -> Rect {
        self.viewport.visible_rect(self.viewport_size)
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.colors.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Vec2};

    #[test]
    fn test_device_transform_applies_scale_factor() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(10.0, 20.0);
        viewport.set_scale(2.0);
        let grid = Grid::default();
        let ctx =
            RenderContext::new(&viewport, &grid, Size::new(800.0, 600.0)).with_scale_factor(2.0);

        let device = ctx.device_transform() * Point::new(5.0, 5.0);
        assert!((device.x - 40.0).abs() < 1e-10);
        assert!((device.y - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_visible_canvas_rect() {
        let mut viewport = Viewport::new();
        viewport.set_scale(0.5);
        let grid = Grid::default();
        let ctx = RenderContext::new(&viewport, &grid, Size::new(800.0, 600.0));
        assert_eq!(ctx.visible_canvas_rect(), Rect::new(0.0, 0.0, 1600.0, 1200.0));
    }

    #[test]
    fn test_colors_for_theme() {
        assert_eq!(CanvasColors::for_theme(false), CanvasColors::LIGHT);
        assert_eq!(CanvasColors::for_theme(true), CanvasColors::DARK);
    }
}
