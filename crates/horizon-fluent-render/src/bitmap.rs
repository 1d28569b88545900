//! CPU-side drawing surface.
//!
//! [`Bitmap`] is the pixel surface every icon is painted onto. It wraps a
//! `tiny_skia` pixmap (premultiplied RGBA) and exposes straight-alpha
//! accessors, scaled composition of other bitmaps, raster decoding through
//! the `image` crate and PNG encoding.
//!
//! # Example
//!
//! ```ignore
//! use horizon_fluent_render::{Bitmap, Color, Rect, ScaleFilter};
//!
//! // A fresh bitmap is fully transparent
//! let mut target = Bitmap::new(32, 32)?;
//!
//! // Decode a PNG and stretch it over the left half
//! let photo = Bitmap::decode(&png_bytes)?;
//! target.draw_bitmap(&photo, Rect::new(0.0, 0.0, 16.0, 32.0), ScaleFilter::Bicubic);
//!
//! let png = target.encode_png()?;
//! ```

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::tiny_skia::{self, ColorU8, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::error::{RenderError, RenderResult};
use crate::types::{Color, Rect};

/// Resampling filter used when a bitmap is scaled onto another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleFilter {
    /// Nearest neighbor sampling. Fast but pixelated.
    Nearest,
    /// Bilinear interpolation.
    Bilinear,
    /// Bicubic interpolation. Smooth results.
    #[default]
    Bicubic,
}

impl ScaleFilter {
    fn to_quality(self) -> FilterQuality {
        match self {
            ScaleFilter::Nearest => FilterQuality::Nearest,
            ScaleFilter::Bilinear => FilterQuality::Bilinear,
            ScaleFilter::Bicubic => FilterQuality::Bicubic,
        }
    }
}

/// A fixed-size RGBA pixel surface.
///
/// New bitmaps start fully transparent. Drawing operations composite with
/// source-over blending, so anything a draw call does not cover keeps its
/// previous value.
#[derive(Clone)]
pub struct Bitmap {
    pixmap: Pixmap,
}

impl Bitmap {
    /// Create a new transparent bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidDimensions`] when either dimension is
    /// zero or the pixel buffer would be too large.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    /// Create a bitmap filled with a solid color.
    pub fn from_color(width: u32, height: u32, color: Color) -> RenderResult<Self> {
        let mut bitmap = Self::new(width, height)?;
        bitmap.fill(color);
        Ok(bitmap)
    }

    /// Create a bitmap from straight-alpha RGBA pixel data.
    ///
    /// The data must be exactly `width * height * 4` bytes in row-major order.
    pub fn from_rgba8(data: &[u8], width: u32, height: u32) -> RenderResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RenderError::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }

        let mut bitmap = Self::new(width, height)?;
        for (dst, src) in bitmap
            .pixmap
            .pixels_mut()
            .iter_mut()
            .zip(data.chunks_exact(4))
        {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Ok(bitmap)
    }

    /// Decode an encoded raster image (PNG, JPEG, BMP, ...) from memory.
    pub fn decode(bytes: &[u8]) -> RenderResult<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| RenderError::ImageDecode(e.to_string()))?
            .to_rgba8();
        tracing::trace!(width = image.width(), height = image.height(), "decoded raster image");
        Self::from_rgba8(image.as_raw(), image.width(), image.height())
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Dimensions as `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// The full bitmap area as a rectangle at the origin.
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    /// Fill every pixel with `color`, replacing existing content.
    pub fn fill(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Get the straight-alpha color of a pixel, or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Color::from_rgba8(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// True when no pixel has any coverage.
    pub fn is_fully_transparent(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Draw `source` scaled to exactly fill `rect`.
    ///
    /// Empty rectangles draw nothing.
    pub fn draw_bitmap(&mut self, source: &Bitmap, rect: Rect, filter: ScaleFilter) {
        if rect.is_empty() {
            return;
        }

        let sx = rect.width() / source.width() as f32;
        let sy = rect.height() / source.height() as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, rect.left(), rect.top());
        let paint = PixmapPaint {
            quality: filter.to_quality(),
            ..PixmapPaint::default()
        };

        self.pixmap
            .draw_pixmap(0, 0, source.pixmap.as_ref(), &paint, transform, None);
    }

    /// Straight-alpha RGBA bytes in row-major order.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            result.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        result
    }

    /// Encode the bitmap as PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let image = RgbaImage::from_raw(self.width(), self.height(), self.to_rgba8()).ok_or(
            RenderError::ImageEncode("pixel buffer does not match dimensions".to_string()),
        )?;

        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| RenderError::ImageEncode(e.to_string()))?;
        Ok(buffer.into_inner())
    }

    /// Encode the bitmap as PNG and write it to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path.as_ref(), bytes).map_err(|e| {
            RenderError::ImageEncode(format!(
                "failed to write {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    pub(crate) fn as_pixmap_mut(&mut self) -> tiny_skia::PixmapMut<'_> {
        self.pixmap.as_mut()
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
