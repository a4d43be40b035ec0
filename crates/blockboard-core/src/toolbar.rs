//! Toolbar actions and the state the toolbar renders from.

/// Actions that can be triggered from the toolbar or a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ZoomToFit,
    ToggleZoomLock,
    AddBlock,
}

impl ToolbarAction {
    /// Whether this action changes the scale and is therefore blocked by zoom-lock.
    pub fn is_zoom(self) -> bool {
        matches!(
            self,
            ToolbarAction::ZoomIn
                | ToolbarAction::ZoomOut
                | ToolbarAction::ZoomReset
                | ToolbarAction::ZoomToFit
        )
    }

    /// Tooltip text.
    pub fn label(self) -> &'static str {
        match self {
            ToolbarAction::ZoomIn => "Zoom in",
            ToolbarAction::ZoomOut => "Zoom out",
            ToolbarAction::ZoomReset => "Reset zoom",
            ToolbarAction::ZoomToFit => "Fit to content",
            ToolbarAction::ToggleZoomLock => "Lock zoom",
            ToolbarAction::AddBlock => "Add block",
        }
    }
}

/// Snapshot of what the toolbar shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarState {
    pub scale: f64,
    pub zoom_locked: bool,
}

impl ToolbarState {
    /// Zoom as a whole percentage.
    pub fn zoom_percent(&self) -> i64 {
        (self.scale * 100.0).round() as i64
    }

    /// Zoom label such as `"150%"`.
    pub fn zoom_label(&self) -> String {
        format!("{}%", self.zoom_percent())
    }

    /// Whether the zoom buttons accept input.
    pub fn zoom_controls_enabled(&self) -> bool {
        !self.zoom_locked
    }

    /// Whether `action` is currently clickable.
    pub fn is_enabled(&self, action: ToolbarAction) -> bool {
        !action.is_zoom() || self.zoom_controls_enabled()
    }
}
