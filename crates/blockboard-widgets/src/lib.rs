//! Reusable egui widget components with Tailwind-inspired styling.
//!
//! This crate provides a collection of styled UI components for egui applications:
//!
//! - **Buttons**: Glyph buttons with selected and disabled states
//! - **Menu**: Panel, toolbar, and card frames
//! - **Layout**: Separators and section labels
//! - **Theme**: Light and dark palettes

pub mod buttons;
pub mod layout;
pub mod menu;

pub use buttons::{IconButton, IconButtonStyle};
pub use layout::{section_label, vertical_separator};
pub use menu::{card_frame, panel_frame, toolbar_frame};
pub use theme::Palette;

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small button size
    pub const SMALL: f32 = 24.0;
    /// Medium button size (toolbar buttons)
    pub const MEDIUM: f32 = 32.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 6;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Selection/active color (blue-600)
    pub const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
    /// Selection/active color on dark backgrounds (blue-400)
    pub const ACCENT_DARK: Color32 = Color32::from_rgb(96, 165, 250);

    /// Color set for one theme.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Palette {
        /// Text color
        pub text: Color32,
        /// Muted text color
        pub text_muted: Color32,
        /// Disabled text color
        pub text_disabled: Color32,
        /// Border color
        pub border: Color32,
        /// Selection/active color
        pub accent: Color32,
        /// Hover background
        pub hover_bg: Color32,
        /// Selected background
        pub selected_bg: Color32,
        /// Panel background
        pub panel_bg: Color32,
        /// Block card background
        pub card_bg: Color32,
        /// Block card drag strip
        pub card_header: Color32,
        /// Shadow color
        pub shadow: Color32,
        /// Whether this is a dark palette
        pub dark: bool,
    }

    impl Palette {
        /// Light palette: white panels, slate text.
        pub const LIGHT: Self = Self {
            text: Color32::from_rgb(71, 85, 105),
            text_muted: Color32::from_rgb(100, 116, 139),
            text_disabled: Color32::from_rgb(203, 213, 225),
            border: Color32::from_rgb(226, 232, 240),
            accent: ACCENT,
            hover_bg: Color32::from_rgb(248, 250, 252),
            selected_bg: Color32::from_rgb(241, 245, 249),
            panel_bg: Color32::WHITE,
            card_bg: Color32::WHITE,
            card_header: Color32::from_rgb(241, 245, 249),
            shadow: Color32::from_black_alpha(25),
            dark: false,
        };

        /// Dark palette: slate-800 panels, light text.
        pub const DARK: Self = Self {
            text: Color32::from_rgb(203, 213, 225),
            text_muted: Color32::from_rgb(148, 163, 184),
            text_disabled: Color32::from_rgb(71, 85, 105),
            border: Color32::from_rgb(51, 65, 85),
            accent: ACCENT_DARK,
            hover_bg: Color32::from_rgb(51, 65, 85),
            selected_bg: Color32::from_rgb(51, 65, 85),
            panel_bg: Color32::from_rgb(30, 41, 59),
            card_bg: Color32::from_rgb(30, 41, 59),
            card_header: Color32::from_rgb(51, 65, 85),
            shadow: Color32::from_black_alpha(60),
            dark: true,
        };

        /// Palette for the given effective theme.
        pub fn for_mode(dark_mode: bool) -> Self {
            if dark_mode { Self::DARK } else { Self::LIGHT }
        }
    }

    impl Default for Palette {
        fn default() -> Self {
            Self::LIGHT
        }
    }
}
