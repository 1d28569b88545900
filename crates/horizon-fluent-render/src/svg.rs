//! SVG rendering support for resolution-independent icons.
//!
//! [`SvgImage`] is the vector-rendering service: it parses SVG markup once
//! and rasterizes it into any destination rectangle of a [`Bitmap`].
//!
//! # Usage
//!
//! ```ignore
//! use horizon_fluent_render::{Bitmap, Rect, SvgImage};
//!
//! let svg = SvgImage::from_data(include_bytes!("settings.svg"))?;
//! let natural = svg.natural_size(); // e.g. 16x16
//!
//! // Paint into part of an existing surface
//! let mut surface = Bitmap::new(64, 64)?;
//! svg.render_into(&mut surface, Rect::new(8.0, 8.0, 48.0, 48.0));
//!
//! // Or rasterize to a standalone bitmap
//! let bitmap = svg.render_to_bitmap(32, 32)?;
//! ```

use std::sync::Arc;

use resvg::tiny_skia::Transform;
use resvg::usvg;

use crate::bitmap::Bitmap;
use crate::error::{RenderError, RenderResult};
use crate::types::{Rect, Size};

/// A parsed SVG document that can be rendered at any resolution.
///
/// The underlying tree is shared behind an `Arc`, so clones are cheap.
#[derive(Clone)]
pub struct SvgImage {
    tree: Arc<usvg::Tree>,
    default_size: Size,
}

impl SvgImage {
    /// Parse SVG markup with antialiasing enabled.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SvgParse`] if the data is not a valid SVG document.
    pub fn from_data(data: &[u8]) -> RenderResult<Self> {
        Self::from_data_with(data, true)
    }

    /// Parse SVG markup, choosing whether shapes are antialiased.
    ///
    /// With `antialias` off, shapes render with crisp edges.
    pub fn from_data_with(data: &[u8], antialias: bool) -> RenderResult<Self> {
        let mut options = usvg::Options::default();
        if !antialias {
            options.shape_rendering = usvg::ShapeRendering::CrispEdges;
        }

        let tree = usvg::Tree::from_data(data, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let size = tree.size();
        let default_size = Size::new(size.width(), size.height());
        tracing::trace!(width = size.width(), height = size.height(), antialias, "parsed SVG");

        Ok(Self {
            tree: Arc::new(tree),
            default_size,
        })
    }

    /// Natural size from the SVG `width`/`height` attributes or `viewBox`.
    pub fn natural_size(&self) -> Size {
        self.default_size
    }

    /// Rasterize the SVG scaled to exactly fill `rect` on `target`.
    ///
    /// The SVG is composited over existing content; nothing outside the
    /// shapes' coverage is touched. Empty rectangles draw nothing.
    pub fn render_into(&self, target: &mut Bitmap, rect: Rect) {
        if rect.is_empty() {
            return;
        }

        let sx = rect.width() / self.default_size.width;
        let sy = rect.height() / self.default_size.height;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, rect.left(), rect.top());

        resvg::render(&self.tree, transform, &mut target.as_pixmap_mut());
    }

    /// Rasterize the SVG into a new transparent bitmap of the given size.
    pub fn render_to_bitmap(&self, width: u32, height: u32) -> RenderResult<Bitmap> {
        let mut bitmap = Bitmap::new(width, height)?;
        self.render_into(&mut bitmap, Rect::from_size(width, height));
        Ok(bitmap)
    }
}

impl std::fmt::Debug for SvgImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgImage")
            .field("natural_size", &self.default_size)
            .finish()
    }
}
