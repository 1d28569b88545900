//! Icon rendering.
//!
//! [`IconRenderer`] is the entry point the host framework calls. It draws
//! an icon, a raw asset locator or a decoded bitmap into a region of a
//! [`Bitmap`], or produces a fresh transparent bitmap of a requested size.
//!
//! # Example
//!
//! ```
//! use horizon_fluent::icon::FluentIcon;
//! use horizon_fluent::renderer::{IconRef, IconRenderer};
//! use horizon_fluent::resource::ResourceManager;
//! use horizon_fluent::theme::{FixedTheme, ThemeMode};
//!
//! let assets = ResourceManager::with_fluent_icons();
//! let oracle = FixedTheme::DARK;
//! let renderer = IconRenderer::new(&assets, &oracle);
//!
//! let bitmap = renderer
//!     .to_bitmap(IconRef::Fluent(&FluentIcon::Home), 32, 32, ThemeMode::Auto)
//!     .unwrap();
//! assert_eq!(bitmap.dimensions(), (32, 32));
//! ```

use std::fmt;

use horizon_fluent_render::{Bitmap, Rect, ScaleFilter};
use parking_lot::Mutex;

use crate::cache::{CacheStats, IconCache, IconCacheKey};
use crate::config::FluentConfig;
use crate::error::Result;
use crate::icon::{AssetLocator, FluentIcon, FluentIconBase};
use crate::painter::Painter;
use crate::resource::ResourceManager;
use crate::theme::{ThemeMode, ThemeOracle};

/// Quality settings applied while painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHints {
    /// Antialias vector shapes. Off renders crisp edges.
    pub antialiasing: bool,
    /// Filter smoothly when scaling bitmaps. Off uses nearest neighbor.
    pub smooth_pixmap_transform: bool,
}

impl RenderHints {
    /// The filter used when scaling bitmaps.
    pub fn scale_filter(&self) -> ScaleFilter {
        if self.smooth_pixmap_transform {
            ScaleFilter::Bicubic
        } else {
            ScaleFilter::Nearest
        }
    }
}

impl Default for RenderHints {
    fn default() -> Self {
        Self {
            antialiasing: true,
            smooth_pixmap_transform: true,
        }
    }
}

/// Something the renderer can draw.
#[derive(Clone, Copy)]
pub enum IconRef<'a> {
    /// A themeable icon.
    Fluent(&'a dyn FluentIconBase),
    /// A raw asset, SVG or raster.
    Locator(&'a AssetLocator),
    /// An already decoded bitmap.
    Bitmap(&'a Bitmap),
}

impl IconRef<'_> {
    fn cache_key(&self) -> Option<String> {
        match self {
            IconRef::Fluent(icon) => icon.cache_key(),
            IconRef::Locator(_) | IconRef::Bitmap(_) => None,
        }
    }
}

impl<'a> From<&'a FluentIcon> for IconRef<'a> {
    fn from(icon: &'a FluentIcon) -> Self {
        IconRef::Fluent(icon)
    }
}

impl<'a> From<&'a AssetLocator> for IconRef<'a> {
    fn from(locator: &'a AssetLocator) -> Self {
        IconRef::Locator(locator)
    }
}

impl<'a> From<&'a Bitmap> for IconRef<'a> {
    fn from(bitmap: &'a Bitmap) -> Self {
        IconRef::Bitmap(bitmap)
    }
}

impl fmt::Debug for IconRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconRef::Fluent(icon) => f
                .debug_tuple("Fluent")
                .field(&icon.cache_key().unwrap_or_else(|| "<uncached>".to_string()))
                .finish(),
            IconRef::Locator(locator) => f.debug_tuple("Locator").field(&locator.to_string()).finish(),
            IconRef::Bitmap(bitmap) => f.debug_tuple("Bitmap").field(bitmap).finish(),
        }
    }
}

/// Draws icons onto bitmaps.
///
/// The renderer borrows its services; it never reads ambient theme state.
pub struct IconRenderer<'a> {
    assets: &'a ResourceManager,
    oracle: &'a dyn ThemeOracle,
    hints: RenderHints,
    cache: Option<Mutex<IconCache>>,
}

impl<'a> IconRenderer<'a> {
    /// Create a renderer with default hints and no cache.
    pub fn new(assets: &'a ResourceManager, oracle: &'a dyn ThemeOracle) -> Self {
        Self {
            assets,
            oracle,
            hints: RenderHints::default(),
            cache: None,
        }
    }

    /// Create a renderer configured from `config`.
    ///
    /// A cache is attached unless `icons.cache_capacity` is zero.
    pub fn from_config(assets: &'a ResourceManager, oracle: &'a dyn ThemeOracle, config: &FluentConfig) -> Self {
        let hints = RenderHints {
            antialiasing: config.icons.antialiasing,
            smooth_pixmap_transform: config.icons.smooth_pixmap_transform,
        };
        let renderer = Self::new(assets, oracle).with_hints(hints);

        match config.icons.cache_capacity {
            0 => renderer,
            capacity => renderer.with_cache(IconCache::new(capacity)),
        }
    }

    /// Replace the render hints.
    pub fn with_hints(mut self, hints: RenderHints) -> Self {
        self.hints = hints;
        self
    }

    /// Attach a bitmap cache used by [`to_bitmap`](Self::to_bitmap).
    pub fn with_cache(mut self, cache: IconCache) -> Self {
        self.cache = Some(Mutex::new(cache));
        self
    }

    /// The active render hints.
    pub fn hints(&self) -> RenderHints {
        self.hints
    }

    /// Cache statistics, if a cache is attached.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.lock().stats())
    }

    /// Drop every cached bitmap.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    /// Draw `icon` scaled to fill `rect` on `surface`.
    ///
    /// Pixels outside the drawn shapes keep their previous value.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingVariant`](crate::Error::MissingVariant) when a
    ///   built-in icon's asset is not bundled
    /// - [`Error::AssetLoad`](crate::Error::AssetLoad) when an asset cannot
    ///   be read or decoded
    pub fn draw(&self, icon: IconRef<'_>, surface: &mut Bitmap, rect: Rect, theme: ThemeMode) -> Result<()> {
        let mut painter = Painter::new(surface, self.assets, self.oracle, self.hints);

        match icon {
            IconRef::Fluent(icon) => icon.render(&mut painter, rect, theme),
            IconRef::Locator(locator) => painter.draw_asset(locator, rect),
            IconRef::Bitmap(bitmap) => {
                painter.draw_bitmap(bitmap, rect);
                Ok(())
            }
        }
    }

    /// Render `icon` into a new transparent `width` x `height` bitmap.
    ///
    /// # Errors
    ///
    /// [`RenderError::InvalidDimensions`](horizon_fluent_render::RenderError::InvalidDimensions)
    /// for a zero dimension, plus everything [`draw`](Self::draw) returns.
    pub fn to_bitmap(&self, icon: IconRef<'_>, width: u32, height: u32, theme: ThemeMode) -> Result<Bitmap> {
        let mut bitmap = Bitmap::new(width, height)?;

        let cache_key = self
            .cache
            .as_ref()
            .and_then(|_| icon.cache_key())
            .map(|key| IconCacheKey::new(key, theme, width, height));

        if let (Some(cache), Some(key)) = (&self.cache, &cache_key) {
            let mut cache = cache.lock();
            cache.sync_theme(self.oracle.is_dark_theme());
            if let Some(cached) = cache.get(key) {
                tracing::trace!(icon = %key.icon, width, height, "icon cache hit");
                return Ok(cached.clone());
            }
        }

        self.draw(icon, &mut bitmap, Rect::from_size(width, height), theme)?;

        if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
            cache.lock().insert(key, bitmap.clone());
        }

        Ok(bitmap)
    }
}

impl fmt::Debug for IconRenderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconRenderer")
            .field("hints", &self.hints)
            .field("cache", &self.cache_stats())
            .finish_non_exhaustive()
    }
}
