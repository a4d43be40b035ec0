//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use kurbo::{Affine, Stroke};
use peniko::Color;
use vello::wgpu::{Device, Queue, Surface, SurfaceError, SurfaceTexture, TextureView};
use vello::{RenderParams, RendererOptions, Scene};

/// Grid line width in canvas pixels.
const GRID_LINE_WIDTH: f64 = 1.0;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Number of grid lines drawn in the last frame.
    grid_lines: usize,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            grid_lines: 0,
        }
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Number of grid lines drawn in the last built frame.
    pub fn grid_line_count(&self) -> usize {
        self.grid_lines
    }

    /// Render the grid lines that intersect the visible canvas region.
    fn render_grid_lines(&mut self, ctx: &RenderContext, transform: Affine, color: Color) {
        let stroke = Stroke::new(GRID_LINE_WIDTH);
        let lines = ctx.grid.lines_within(ctx.visible_canvas_rect());
        for line in &lines {
            self.scene.stroke(&stroke, transform, color, None, line);
        }
        self.grid_lines = lines.len();
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Clear the scene
        self.scene.reset();
        self.grid_lines = 0;

        if ctx.show_grid {
            self.render_grid_lines(ctx, ctx.device_transform(), ctx.colors.grid);
        }
    }
}

impl From<SurfaceError> for RendererError {
    fn from(err: SurfaceError) -> Self {
        RendererError::Surface(err.to_string())
    }
}

/// Create the GPU renderer that rasterizes scenes on `device`.
pub fn create_gpu_renderer(device: &Device) -> RenderResult<vello::Renderer> {
    vello::Renderer::new(device, RendererOptions::default())
        .map_err(|e| RendererError::InitFailed(e.to_string()))
}

/// Acquire the next frame's texture from `surface`.
pub fn acquire_surface_texture(surface: &Surface<'_>) -> RenderResult<SurfaceTexture> {
    Ok(surface.get_current_texture()?)
}

/// Rasterize `scene` into `target`.
pub fn render_scene(
    renderer: &mut vello::Renderer,
    device: &Device,
    queue: &Queue,
    scene: &Scene,
    target: &TextureView,
    params: &RenderParams,
) -> RenderResult<()> {
    renderer
        .render_to_texture(device, queue, scene, target, params)
        .map_err(|e| RendererError::RenderFailed(e.to_string()))
}
