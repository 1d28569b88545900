//! TOML configuration.
//!
//! ```toml
//! theme = "auto"          # light | dark | auto
//!
//! [icons]
//! cache_capacity = 256    # 0 disables the bitmap cache
//! antialiasing = true
//! smooth_pixmap_transform = true
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::theme::ThemeMode;

/// Default number of rendered bitmaps kept by the icon cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FluentConfig {
    /// The application theme preference.
    pub theme: ThemeMode,
    /// Icon rendering settings.
    pub icons: IconSettings,
}

/// Icon rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconSettings {
    /// Maximum number of cached bitmaps. Zero disables caching.
    pub cache_capacity: usize,
    /// Antialias vector shapes.
    pub antialiasing: bool,
    /// Use smooth filtering when scaling bitmaps.
    pub smooth_pixmap_transform: bool,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            antialiasing: true,
            smooth_pixmap_transform: true,
        }
    }
}

impl FluentConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), theme = %config.theme, "loaded configuration");
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }
}
