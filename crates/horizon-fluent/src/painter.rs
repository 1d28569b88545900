//! Drawing assets onto a bitmap.
//!
//! A [`Painter`] borrows a [`Bitmap`] for the duration of one draw call and
//! knows how to load and rasterize assets into regions of it. Icons receive
//! a painter in [`FluentIconBase::render`](crate::icon::FluentIconBase::render).

use std::fmt;

use horizon_fluent_render::{Bitmap, Rect, SvgImage};

use crate::error::{Error, Result};
use crate::icon::{AssetLocator, IconContext};
use crate::renderer::RenderHints;
use crate::resource::ResourceManager;
use crate::theme::ThemeOracle;

/// How an asset's bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetFormat {
    /// SVG markup, rasterized at the target size.
    Svg,
    /// An encoded raster image (PNG, JPEG, ...), scaled to the target size.
    Raster,
}

impl AssetFormat {
    /// Detect the format of a loaded asset.
    ///
    /// SVG paths and inline markup are vector; otherwise content starting
    /// with `<` (after an optional BOM and whitespace) is vector and
    /// anything else is raster.
    pub fn detect(locator: &AssetLocator, data: &[u8]) -> Self {
        if locator.is_svg() {
            return AssetFormat::Svg;
        }
        Self::from_magic_bytes(data)
    }

    /// Detect the format from content alone.
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        match data.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'<') => AssetFormat::Svg,
            _ => AssetFormat::Raster,
        }
    }
}

/// Draws assets onto a borrowed bitmap.
pub struct Painter<'a> {
    surface: &'a mut Bitmap,
    assets: &'a ResourceManager,
    oracle: &'a dyn ThemeOracle,
    hints: RenderHints,
}

impl<'a> Painter<'a> {
    /// Create a painter over `surface`.
    pub fn new(
        surface: &'a mut Bitmap,
        assets: &'a ResourceManager,
        oracle: &'a dyn ThemeOracle,
        hints: RenderHints,
    ) -> Self {
        Self {
            surface,
            assets,
            oracle,
            hints,
        }
    }

    /// The services icons resolve against.
    pub fn context(&self) -> IconContext<'a> {
        IconContext::new(self.assets, self.oracle)
    }

    /// The active render hints.
    pub fn hints(&self) -> RenderHints {
        self.hints
    }

    /// The surface being painted.
    pub fn surface(&self) -> &Bitmap {
        &*self.surface
    }

    /// Draw an SVG asset scaled to fill `rect`.
    ///
    /// # Errors
    ///
    /// [`Error::AssetLoad`] when the asset cannot be read or parsed.
    pub fn draw_svg(&mut self, locator: &AssetLocator, rect: Rect) -> Result<()> {
        let data = locator.load(self.assets)?;
        self.draw_svg_data(locator, &data, rect)
    }

    /// Draw a raster asset scaled to fill `rect`.
    ///
    /// # Errors
    ///
    /// [`Error::AssetLoad`] when the asset cannot be read or decoded.
    pub fn draw_raster(&mut self, locator: &AssetLocator, rect: Rect) -> Result<()> {
        let data = locator.load(self.assets)?;
        self.draw_raster_data(locator, &data, rect)
    }

    /// Draw an asset of either format scaled to fill `rect`.
    pub fn draw_asset(&mut self, locator: &AssetLocator, rect: Rect) -> Result<()> {
        let data = locator.load(self.assets)?;
        let format = AssetFormat::detect(locator, &data);
        tracing::debug!(%locator, ?format, "detected asset format");

        match format {
            AssetFormat::Svg => self.draw_svg_data(locator, &data, rect),
            AssetFormat::Raster => self.draw_raster_data(locator, &data, rect),
        }
    }

    /// Draw a decoded bitmap scaled to fill `rect`.
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, rect: Rect) {
        self.surface.draw_bitmap(bitmap, rect, self.hints.scale_filter());
    }

    fn draw_svg_data(&mut self, locator: &AssetLocator, data: &[u8], rect: Rect) -> Result<()> {
        let svg = SvgImage::from_data_with(data, self.hints.antialiasing)
            .map_err(|e| Error::asset_load(locator.to_string(), e.to_string()))?;
        svg.render_into(self.surface, rect);
        Ok(())
    }

    fn draw_raster_data(&mut self, locator: &AssetLocator, data: &[u8], rect: Rect) -> Result<()> {
        let bitmap = Bitmap::decode(data).map_err(|e| Error::asset_load(locator.to_string(), e.to_string()))?;
        self.draw_bitmap(&bitmap, rect);
        Ok(())
    }
}

impl fmt::Debug for Painter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Painter")
            .field("surface", &self.surface)
            .field("hints", &self.hints)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::FixedTheme;
    use horizon_fluent_render::Color;

    const RED_SQUARE: &[u8] =
        br##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><path d="M0 0H4V4H0Z" fill="#FF0000"/></svg>"##;

    #[test]
    fn test_detect_format() {
        let png = AssetLocator::from("/tmp/a.png");
        assert_eq!(AssetFormat::detect(&png, b"\x89PNG\r\n"), AssetFormat::Raster);
        assert_eq!(AssetFormat::detect(&png, b"  <svg/>"), AssetFormat::Svg);
        assert_eq!(
            AssetFormat::detect(&AssetLocator::from("a.svg"), b"\x89PNG"),
            AssetFormat::Svg
        );
        assert_eq!(AssetFormat::from_magic_bytes(b"\xEF\xBB\xBF<svg/>"), AssetFormat::Svg);
        assert_eq!(AssetFormat::from_magic_bytes(b""), AssetFormat::Raster);
    }

    #[test]
    fn test_draw_inline_svg() {
        let assets = ResourceManager::new();
        let mut surface = Bitmap::new(8, 8).unwrap();
        let mut painter = Painter::new(&mut surface, &assets, &FixedTheme::LIGHT, RenderHints::default());

        painter
            .draw_svg(&AssetLocator::Markup(RED_SQUARE.to_vec()), Rect::new(0.0, 0.0, 4.0, 4.0))
            .unwrap();

        assert_eq!(surface.pixel(1, 1), Some(Color::RED));
        assert_eq!(surface.pixel(6, 6), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_corrupt_svg_is_asset_error() {
        let assets = ResourceManager::new();
        let mut surface = Bitmap::new(8, 8).unwrap();
        let mut painter = Painter::new(&mut surface, &assets, &FixedTheme::LIGHT, RenderHints::default());

        let result = painter.draw_svg(&AssetLocator::Markup(b"<svg".to_vec()), Rect::from_size(8, 8));
        assert!(matches!(result, Err(Error::AssetLoad { .. })));
    }

    #[test]
    fn test_corrupt_raster_is_asset_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG not really").unwrap();

        let assets = ResourceManager::new();
        let mut surface = Bitmap::new(8, 8).unwrap();
        let mut painter = Painter::new(&mut surface, &assets, &FixedTheme::LIGHT, RenderHints::default());

        let result = painter.draw_asset(&AssetLocator::from(path.to_str().unwrap()), Rect::from_size(8, 8));
        assert!(matches!(result, Err(Error::AssetLoad { .. })));
        assert!(surface.is_fully_transparent());
    }

    #[test]
    fn test_context_uses_painter_services() {
        let assets = ResourceManager::new();
        let mut surface = Bitmap::new(1, 1).unwrap();
        let painter = Painter::new(&mut surface, &assets, &FixedTheme::DARK, RenderHints::default());

        assert!(painter.context().oracle.is_dark_theme());
    }
}
