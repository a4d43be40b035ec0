//! Frames: floating panels, toolbars, and block cards.

use egui::{Color32, CornerRadius, Frame, Margin, Stroke};

use crate::{Palette, sizing};

fn shadow(blur: u8, color: Color32) -> egui::epaint::Shadow {
    egui::epaint::Shadow {
        spread: 0,
        blur,
        offset: [0, 2],
        color,
    }
}

/// Create a standard panel frame with shadow.
pub fn panel_frame(palette: &Palette) -> Frame {
    Frame::new()
        .fill(palette.panel_bg)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, palette.border))
        .shadow(shadow(12, palette.shadow))
        .inner_margin(Margin::same(12))
}

/// Create a toolbar panel frame (tighter padding).
pub fn toolbar_frame(palette: &Palette) -> Frame {
    Frame::new()
        .fill(palette.panel_bg)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, palette.border))
        .shadow(shadow(12, palette.shadow))
        .inner_margin(Margin::same(4))
}

/// Create a block card frame. `zoom` scales the corner radius.
pub fn card_frame(palette: &Palette, zoom: f32, active: bool) -> Frame {
    let border = if active { palette.accent } else { palette.border };
    let radius = (sizing::PANEL_RADIUS as f32 * zoom).round().clamp(0.0, 255.0) as u8;
    Frame::new()
        .fill(palette.card_bg)
        .corner_radius(CornerRadius::same(radius))
        .stroke(Stroke::new(1.0, border))
        .shadow(shadow(8, palette.shadow))
        .inner_margin(Margin::ZERO)
}
