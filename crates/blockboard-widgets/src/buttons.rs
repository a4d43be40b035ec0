//! Button components: glyph buttons.

use egui::{Align2, Color32, CornerRadius, CursorIcon, FontId, Sense, Ui, Vec2, vec2};

use crate::{Palette, sizing};

/// Style configuration for icon buttons.
#[derive(Clone)]
pub struct IconButtonStyle {
    /// Button size
    pub size: Vec2,
    /// Glyph font size
    pub glyph_size: f32,
    /// Corner radius
    pub corner_radius: u8,
    /// Whether to use solid fill style when selected
    pub solid_selected: bool,
}

impl Default for IconButtonStyle {
    fn default() -> Self {
        Self {
            size: vec2(sizing::MEDIUM, sizing::MEDIUM),
            glyph_size: 16.0,
            corner_radius: sizing::CORNER_RADIUS,
            solid_selected: false,
        }
    }
}

impl IconButtonStyle {
    /// Create a small icon button style (24x24 button, 13pt glyph)
    pub fn small() -> Self {
        Self {
            size: vec2(sizing::SMALL, sizing::SMALL),
            glyph_size: 13.0,
            ..Default::default()
        }
    }

    /// Solid accent fill when selected
    pub fn solid() -> Self {
        Self {
            solid_selected: true,
            ..Default::default()
        }
    }
}

/// A square button showing a single glyph (emoji or symbol).
pub struct IconButton<'a> {
    glyph: &'a str,
    tooltip: &'a str,
    shortcut: Option<&'a str>,
    selected: bool,
    enabled: bool,
    palette: Palette,
    style: IconButtonStyle,
}

impl<'a> IconButton<'a> {
    /// Create a new icon button.
    pub fn new(glyph: &'a str, tooltip: &'a str) -> Self {
        Self {
            glyph,
            tooltip,
            shortcut: None,
            selected: false,
            enabled: true,
            palette: Palette::default(),
            style: IconButtonStyle::default(),
        }
    }

    /// Set whether the button is selected/active.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set whether the button accepts clicks.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the color palette.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the button style.
    pub fn style(mut self, style: IconButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Set keyboard shortcut (shown in hover tooltip).
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let sense = if self.enabled {
            Sense::click()
        } else {
            Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(self.style.size, sense);
        let palette = &self.palette;

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected && self.style.solid_selected {
                palette.accent
            } else if self.selected {
                palette.selected_bg
            } else if self.enabled && response.hovered() {
                palette.hover_bg
            } else {
                Color32::TRANSPARENT
            };

            ui.painter().rect_filled(
                rect,
                CornerRadius::same(self.style.corner_radius),
                bg_color,
            );

            let glyph_color = if !self.enabled {
                palette.text_disabled
            } else if self.selected && self.style.solid_selected {
                Color32::WHITE
            } else if self.selected {
                palette.accent
            } else {
                palette.text
            };

            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.glyph,
                FontId::proportional(self.style.glyph_size),
                glyph_color,
            );
        }

        let clicked = self.enabled && response.clicked();
        // Show tooltip with optional shortcut
        let response = if let Some(shortcut) = self.shortcut {
            response.on_hover_ui(|ui| {
                ui.horizontal(|ui| {
                    ui.label(self.tooltip);
                    ui.label(
                        egui::RichText::new(format!("({})", shortcut))
                            .color(Color32::from_gray(128))
                            .small(),
                    );
                });
            })
        } else {
            response.on_hover_text(self.tooltip)
        };
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        } else {
            response.on_hover_cursor(CursorIcon::NotAllowed);
        }
        clicked
    }
}
