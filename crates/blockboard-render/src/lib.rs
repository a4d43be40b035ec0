//! Blockboard Render Library
//!
//! Renderer abstraction and implementations for Blockboard.
//! The default implementation uses Vello to draw the canvas background and grid;
//! block cards are drawn by the UI layer on top.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{CanvasColors, RenderContext, RenderResult, Renderer, RendererError};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::{
    VelloRenderer, acquire_surface_texture, create_gpu_renderer, render_scene,
};
