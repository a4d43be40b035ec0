//! Keyboard shortcut registry and documentation.

use blockboard_core::ToolbarAction;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    /// Toolbar action the shortcut triggers. `None` for pointer gestures
    /// that are listed for reference only.
    pub action: Option<ToolbarAction>,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action: None,
        }
    }

    pub const fn with_action(mut self, action: ToolbarAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Format the shortcut for display (e.g., "Ctrl+0").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool) -> bool {
        self.ctrl == ctrl && self.key.eq_ignore_ascii_case(key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("=", true, false, "Zoom in").with_action(ToolbarAction::ZoomIn),
            Shortcut::new("+", true, false, "Zoom in").with_action(ToolbarAction::ZoomIn),
            Shortcut::new("-", true, false, "Zoom out").with_action(ToolbarAction::ZoomOut),
            Shortcut::new("0", true, false, "Reset zoom to 100%")
                .with_action(ToolbarAction::ZoomReset),
            Shortcut::new("1", true, false, "Zoom to fit all blocks")
                .with_action(ToolbarAction::ZoomToFit),
            Shortcut::new("L", true, false, "Lock or unlock zoom")
                .with_action(ToolbarAction::ToggleZoomLock),
            Shortcut::new("B", true, false, "Add a text block")
                .with_action(ToolbarAction::AddBlock),
            Shortcut::new("Scroll", true, false, "Zoom the canvas"),
            Shortcut::new("Scroll", false, true, "Scroll horizontally"),
            Shortcut::new("Alt+Drag", false, false, "Duplicate a block"),
            Shortcut::new("Drag", false, true, "Snap a block to a 10px grid"),
        ]
    }

    /// Find the action bound to `key` with the given command modifier.
    ///
    /// `ctrl` is true for either Ctrl or Cmd.
    pub fn lookup(key: &str, ctrl: bool) -> Option<ToolbarAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.action.is_some() && shortcut.matches(key, ctrl))
            .and_then(|shortcut| shortcut.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let shortcut = Shortcut::new("Scroll", false, true, "Scroll horizontally");
        assert_eq!(shortcut.format(), "Shift+Scroll");
        let shortcut = Shortcut::new("0", true, false, "Reset zoom");
        assert_eq!(shortcut.format(), "Ctrl+0");
    }

    #[test]
    fn test_lookup_zoom_keys() {
        assert_eq!(ShortcutRegistry::lookup("=", true), Some(ToolbarAction::ZoomIn));
        assert_eq!(ShortcutRegistry::lookup("+", true), Some(ToolbarAction::ZoomIn));
        assert_eq!(ShortcutRegistry::lookup("-", true), Some(ToolbarAction::ZoomOut));
        assert_eq!(ShortcutRegistry::lookup("0", true), Some(ToolbarAction::ZoomReset));
        assert_eq!(ShortcutRegistry::lookup("1", true), Some(ToolbarAction::ZoomToFit));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(
            ShortcutRegistry::lookup("l", true),
            Some(ToolbarAction::ToggleZoomLock)
        );
        assert_eq!(ShortcutRegistry::lookup("b", true), Some(ToolbarAction::AddBlock));
    }

    #[test]
    fn test_lookup_requires_command_modifier() {
        assert_eq!(ShortcutRegistry::lookup("=", false), None);
        assert_eq!(ShortcutRegistry::lookup("b", false), None);
    }

    #[test]
    fn test_reference_rows_have_no_action() {
        assert_eq!(ShortcutRegistry::lookup("Scroll", true), None);
        assert!(
            ShortcutRegistry::all()
                .iter()
                .any(|s| s.key == "Alt+Drag" && s.action.is_none())
        );
    }
}
