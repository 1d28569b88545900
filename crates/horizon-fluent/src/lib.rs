//! Themed vector icons for Horizon Fluent.
//!
//! This crate maps logical icon identifiers and a theme mode to renderable
//! images, featuring:
//!
//! - **Icon catalog**: the built-in [`FluentIcon`](icon::FluentIcon) set,
//!   bundled as black and white SVG variants
//! - **Theme resolution**: `ThemeMode::Auto` follows an injected
//!   [`ThemeOracle`](theme::ThemeOracle) on every call
//! - **Runtime recoloring**: rewrite `path` attributes of SVG markup to
//!   derive theme variants without pre-baked assets
//! - **Rendering**: draw icons, raw assets or bitmaps into any region of a
//!   [`Bitmap`], with an optional LRU bitmap cache
//! - **Extensibility**: implement [`FluentIconBase`](icon::FluentIconBase)
//!   for application icons
//!
//! # Example
//!
//! ```
//! use horizon_fluent::prelude::*;
//!
//! let assets = ResourceManager::with_fluent_icons();
//! let theme = ThemeSetting::with_fallback(ThemeMode::Light, FixedTheme::LIGHT);
//! let renderer = IconRenderer::new(&assets, &theme);
//!
//! let mut surface = Bitmap::new(64, 64).unwrap();
//! renderer
//!     .draw(IconRef::Fluent(&FluentIcon::Home), &mut surface, Rect::new(16.0, 16.0, 32.0, 32.0), ThemeMode::Auto)
//!     .unwrap();
//!
//! // Outside the icon's rectangle nothing was painted
//! assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));
//! ```

pub mod cache;
pub mod config;
pub mod icon;
pub mod markup;
pub mod painter;
pub mod renderer;
pub mod resource;
pub mod theme;

mod error;

pub use error::{Error, Result};

pub use horizon_fluent_render::{Bitmap, Color, Point, Rect, RenderError, ScaleFilter, Size};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::cache::{CacheStats, IconCache};
    pub use crate::config::{FluentConfig, IconSettings};
    pub use crate::icon::{AssetLocator, FluentIcon, FluentIconBase, IconContext, RecoloredIcon, ThemedIcon};
    pub use crate::markup::{ColorAttributes, PATH_TAG, SvgDocument, rewrite, write_svg};
    pub use crate::painter::Painter;
    pub use crate::renderer::{IconRef, IconRenderer, RenderHints};
    pub use crate::resource::ResourceManager;
    pub use crate::theme::{FixedTheme, IconColor, SystemTheme, ThemeMode, ThemeOracle, ThemeSetting};
    pub use crate::Error;
    pub use horizon_fluent_render::{Bitmap, Color, Rect};
}
