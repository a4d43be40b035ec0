//! Input types passed explicitly with pointer, wheel, and gesture events.

use kurbo::Vec2;

/// Modifier keys held while an event happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Only ctrl held.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Only alt (option) held.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Whether the wheel should zoom instead of scroll (ctrl, or cmd on macOS).
    pub fn zooms(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether a block drag should snap to the grid.
    pub fn snaps(&self) -> bool {
        self.shift
    }

    /// Whether a block drag started with these modifiers duplicates the block.
    pub fn duplicates(&self) -> bool {
        self.alt
    }
}

/// What the pointer was over when a button went down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas area.
    Canvas,
    /// A block card.
    Block,
    /// Toolbar or other UI chrome.
    Chrome,
}

/// A wheel or trackpad scroll, in screen pixels.
///
/// Uses the DOM convention: positive `y` scrolls down, positive `x` scrolls right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta: Vec2,
    pub modifiers: Modifiers,
}

impl WheelEvent {
    pub fn new(delta: Vec2, modifiers: Modifiers) -> Self {
        Self { delta, modifiers }
    }

    /// Scroll delta with axes swapped when shift is held.
    pub fn scroll_delta(&self) -> Vec2 {
        if self.modifiers.shift {
            Vec2::new(self.delta.y, self.delta.x)
        } else {
            self.delta
        }
    }
}
