//! Layout helpers: separators, section labels.

use egui::{Stroke, Ui};

use crate::Palette;

/// Draw a vertical separator line (small height).
pub fn vertical_separator(ui: &mut Ui, palette: &Palette) {
    ui.add_space(3.0);
    let rect = ui.available_rect_before_wrap();
    let height = 20.0;
    let x = rect.left() + 1.0;
    let top = rect.center().y - height / 2.0;
    ui.painter().line_segment(
        [egui::Pos2::new(x, top), egui::Pos2::new(x, top + height)],
        Stroke::new(1.0, palette.border),
    );
    ui.add_space(5.0);
}

/// Draw a section label (small, muted text).
pub fn section_label(ui: &mut Ui, text: &str, palette: &Palette) {
    ui.label(
        egui::RichText::new(text)
            .size(10.0)
            .color(palette.text_muted),
    );
}
