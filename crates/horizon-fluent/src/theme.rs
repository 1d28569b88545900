//! Theme modes and the theme oracle.
//!
//! Icons are drawn black on light themes and white on dark themes. Which of
//! the two applies is answered by a [`ThemeOracle`], an injected query that
//! the resolver consults on every call. Nothing in this crate caches the
//! answer across calls.
//!
//! # Example
//!
//! ```
//! use horizon_fluent::theme::{IconColor, ThemeMode, ThemeSetting};
//!
//! let setting = ThemeSetting::new(ThemeMode::Dark);
//! assert_eq!(ThemeMode::Auto.resolve(&setting), IconColor::White);
//!
//! setting.set_mode(ThemeMode::Light);
//! assert_eq!(ThemeMode::Auto.resolve(&setting), IconColor::Black);
//! ```

use std::fmt;

use horizon_fluent_render::Color;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// The theme an icon should be rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme: black icons.
    Light,
    /// Dark theme: white icons.
    Dark,
    /// Follow the oracle at the time of the call.
    #[default]
    Auto,
}

impl ThemeMode {
    /// Resolve this mode to a concrete icon color.
    ///
    /// `Light` and `Dark` are used directly; `Auto` queries `oracle`.
    pub fn resolve(self, oracle: &dyn ThemeOracle) -> IconColor {
        match self {
            ThemeMode::Light => IconColor::Black,
            ThemeMode::Dark => IconColor::White,
            ThemeMode::Auto => icon_color(oracle),
        }
    }

    /// True when this mode renders as dark under `oracle`.
    pub fn is_dark(self, oracle: &dyn ThemeOracle) -> bool {
        self.resolve(oracle) == IconColor::White
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
            ThemeMode::Auto => f.write_str("auto"),
        }
    }
}

/// The resolved color of an icon variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconColor {
    /// Variant drawn for light themes.
    Black,
    /// Variant drawn for dark themes.
    White,
}

impl IconColor {
    /// Pick the variant for a dark or light theme.
    pub fn from_dark(dark: bool) -> Self {
        if dark { IconColor::White } else { IconColor::Black }
    }

    /// The file name suffix of this variant (`black` or `white`).
    pub fn suffix(self) -> &'static str {
        match self {
            IconColor::Black => "black",
            IconColor::White => "white",
        }
    }

    /// Parse a file name suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "black" => Some(IconColor::Black),
            "white" => Some(IconColor::White),
            _ => None,
        }
    }

    /// The pixel color of this variant.
    pub fn color(self) -> Color {
        match self {
            IconColor::Black => Color::BLACK,
            IconColor::White => Color::WHITE,
        }
    }
}

impl fmt::Display for IconColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Icon color for the oracle's current theme.
pub fn icon_color(oracle: &dyn ThemeOracle) -> IconColor {
    IconColor::from_dark(oracle.is_dark_theme())
}

// ============================================================================
// Oracles
// ============================================================================

/// Answers whether the application is currently using a dark theme.
///
/// The answer is treated as ground truth at call time.
pub trait ThemeOracle {
    /// True when the current theme is dark.
    fn is_dark_theme(&self) -> bool;
}

impl<F> ThemeOracle for F
where
    F: Fn() -> bool,
{
    fn is_dark_theme(&self) -> bool {
        self()
    }
}

/// An oracle with a constant answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedTheme(pub bool);

impl FixedTheme {
    /// Always light.
    pub const LIGHT: Self = Self(false);
    /// Always dark.
    pub const DARK: Self = Self(true);
}

impl ThemeOracle for FixedTheme {
    fn is_dark_theme(&self) -> bool {
        self.0
    }
}

/// The system color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorScheme {
    /// Light color scheme (dark text on light background).
    Light,
    /// Dark color scheme (light text on dark background).
    Dark,
    /// Color scheme could not be determined or user has no preference.
    #[default]
    Unknown,
}

impl ColorScheme {
    /// Returns true if this is the dark color scheme.
    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}

/// The operating system's light/dark preference.
///
/// An unknown preference counts as light.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTheme;

impl SystemTheme {
    /// Get the current system color scheme.
    #[cfg(feature = "system-theme")]
    pub fn color_scheme() -> ColorScheme {
        match dark_light::detect() {
            dark_light::Mode::Dark => ColorScheme::Dark,
            dark_light::Mode::Light => ColorScheme::Light,
            dark_light::Mode::Default => ColorScheme::Unknown,
        }
    }

    #[cfg(not(feature = "system-theme"))]
    pub fn color_scheme() -> ColorScheme {
        ColorScheme::Unknown
    }
}

impl ThemeOracle for SystemTheme {
    fn is_dark_theme(&self) -> bool {
        Self::color_scheme().is_dark()
    }
}

/// The application's theme preference.
///
/// Holds a settable [`ThemeMode`]. `Light` and `Dark` answer directly;
/// `Auto` defers to a fallback oracle, [`SystemTheme`] unless replaced.
pub struct ThemeSetting {
    mode: RwLock<ThemeMode>,
    fallback: Box<dyn ThemeOracle + Send + Sync>,
}

impl ThemeSetting {
    /// Create a setting that defers `Auto` to the system preference.
    pub fn new(mode: ThemeMode) -> Self {
        Self::with_fallback(mode, SystemTheme)
    }

    /// Create a setting that defers `Auto` to `fallback`.
    pub fn with_fallback(mode: ThemeMode, fallback: impl ThemeOracle + Send + Sync + 'static) -> Self {
        Self {
            mode: RwLock::new(mode),
            fallback: Box::new(fallback),
        }
    }

    /// Build the setting from configuration.
    pub fn from_config(config: &crate::config::FluentConfig) -> Self {
        Self::new(config.theme)
    }

    /// The configured mode.
    pub fn mode(&self) -> ThemeMode {
        *self.mode.read()
    }

    /// Change the configured mode.
    pub fn set_mode(&self, mode: ThemeMode) {
        *self.mode.write() = mode;
    }
}

impl ThemeOracle for ThemeSetting {
    fn is_dark_theme(&self) -> bool {
        match self.mode() {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::Auto => self.fallback.is_dark_theme(),
        }
    }
}

impl Default for ThemeSetting {
    fn default() -> Self {
        Self::new(ThemeMode::Auto)
    }
}

impl fmt::Debug for ThemeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSetting")
            .field("mode", &self.mode())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_explicit_modes_ignore_oracle() {
        assert_eq!(ThemeMode::Light.resolve(&FixedTheme::DARK), IconColor::Black);
        assert_eq!(ThemeMode::Dark.resolve(&FixedTheme::LIGHT), IconColor::White);
    }

    #[test]
    fn test_auto_follows_oracle() {
        assert_eq!(ThemeMode::Auto.resolve(&FixedTheme::DARK), IconColor::White);
        assert_eq!(ThemeMode::Auto.resolve(&FixedTheme::LIGHT), IconColor::Black);
    }

    #[test]
    fn test_closure_oracle_is_queried_every_call() {
        let dark = Cell::new(false);
        let oracle = || dark.get();

        assert_eq!(ThemeMode::Auto.resolve(&oracle), IconColor::Black);
        dark.set(true);
        assert_eq!(ThemeMode::Auto.resolve(&oracle), IconColor::White);
    }

    #[test]
    fn test_icon_color_suffix() {
        assert_eq!(IconColor::Black.suffix(), "black");
        assert_eq!(IconColor::White.to_string(), "white");
        assert_eq!(IconColor::from_suffix("white"), Some(IconColor::White));
        assert_eq!(IconColor::from_suffix("gray"), None);
        assert_eq!(IconColor::White.color(), Color::WHITE);
    }

    #[test]
    fn test_theme_setting_modes() {
        let setting = ThemeSetting::with_fallback(ThemeMode::Light, FixedTheme::DARK);
        assert!(!setting.is_dark_theme());

        setting.set_mode(ThemeMode::Dark);
        assert!(setting.is_dark_theme());

        setting.set_mode(ThemeMode::Auto);
        assert_eq!(setting.mode(), ThemeMode::Auto);
        assert!(setting.is_dark_theme());
    }

    #[test]
    fn test_theme_mode_default_is_auto() {
        assert_eq!(ThemeMode::default(), ThemeMode::Auto);
        assert_eq!(ThemeMode::Dark.to_string(), "dark");
    }

    #[test]
    fn test_color_scheme_is_dark() {
        assert!(ColorScheme::Dark.is_dark());
        assert!(!ColorScheme::Light.is_dark());
        assert!(!ColorScheme::Unknown.is_dark());
    }

    #[test]
    fn test_system_theme_detection() {
        // Just verify it doesn't panic
        let _dark = SystemTheme.is_dark_theme();
    }
}
