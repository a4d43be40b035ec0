//! Theme preference and its resolution against the OS setting.

use serde::{Deserialize, Serialize};

/// User-selected theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::System,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
            ThemePreference::System => "System",
        }
    }
}

/// Tracks the preference, the last known OS theme, and the effective mode.
///
/// OS theme notifications only take effect while the preference is
/// [`ThemePreference::System`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSwitcher {
    preference: ThemePreference,
    os_dark: bool,
    dark_mode: bool,
}

impl ThemeSwitcher {
    /// Resolve `preference` against the OS theme at startup.
    pub fn new(preference: ThemePreference, os_dark: bool) -> Self {
        let mut switcher = Self {
            preference,
            os_dark,
            dark_mode: false,
        };
        switcher.resolve();
        switcher
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// Effective dark mode.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Last OS theme seen while subscribed.
    pub fn os_dark(&self) -> bool {
        self.os_dark
    }

    /// Whether OS theme notifications are currently applied.
    pub fn is_subscribed(&self) -> bool {
        self.preference == ThemePreference::System
    }

    /// Select a preference. Selecting `System` re-reads the OS value.
    pub fn select(&mut self, preference: ThemePreference, os_dark_now: bool) {
        self.preference = preference;
        if preference == ThemePreference::System {
            self.os_dark = os_dark_now;
        }
        self.resolve();
    }

    /// Apply an OS theme change. Returns true if the effective mode changed.
    pub fn os_theme_changed(&mut self, dark: bool) -> bool {
        if !self.is_subscribed() {
            return false;
        }
        self.os_dark = dark;
        let before = self.dark_mode;
        self.resolve();
        before != self.dark_mode
    }

    fn resolve(&mut self) {
        self.dark_mode = match self.preference {
            ThemePreference::Light => false,
            ThemePreference::Dark => true,
            ThemePreference::System => self.os_dark,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_follows_os() {
        let mut theme = ThemeSwitcher::new(ThemePreference::System, true);
        assert!(theme.dark_mode());

        assert!(theme.os_theme_changed(false));
        assert!(!theme.dark_mode());
    }

    #[test]
    fn test_explicit_preference_ignores_os() {
        let mut theme = ThemeSwitcher::new(ThemePreference::Light, true);
        assert!(!theme.dark_mode());
        assert!(!theme.is_subscribed());

        assert!(!theme.os_theme_changed(true));
        assert!(!theme.dark_mode());

        theme.select(ThemePreference::Dark, false);
        assert!(theme.dark_mode());
    }

    #[test]
    fn test_selecting_system_rereads_os() {
        let mut theme = ThemeSwitcher::new(ThemePreference::Dark, false);
        theme.select(ThemePreference::System, true);
        assert!(theme.dark_mode());
        assert!(theme.is_subscribed());
    }

    #[test]
    fn test_preference_json() {
        assert_eq!(
            serde_json::to_string(&ThemePreference::System).unwrap(),
            "\"system\""
        );
        let parsed: ThemePreference = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(parsed, ThemePreference::Dark);
    }
}
