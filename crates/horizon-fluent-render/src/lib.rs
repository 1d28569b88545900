//! Software rasterization primitives for Horizon Fluent.
//!
//! This crate provides the pixel-level layer the icon subsystem paints onto:
//!
//! - [`Bitmap`]: a transparent-by-default RGBA surface with scaled
//!   composition, raster decoding and PNG encoding
//! - [`SvgImage`]: SVG parsing and rasterization backed by `resvg`
//! - [`Rect`], [`Size`], [`Point`], [`Color`]: geometry and color types
//!
//! # Example
//!
//! ```no_run
//! use horizon_fluent_render::{Bitmap, Rect, SvgImage};
//!
//! # fn example(markup: &[u8]) -> horizon_fluent_render::RenderResult<()> {
//! let svg = SvgImage::from_data(markup)?;
//!
//! let mut surface = Bitmap::new(48, 48)?;
//! svg.render_into(&mut surface, Rect::new(8.0, 8.0, 32.0, 32.0));
//!
//! surface.save_png("icon.png")?;
//! # Ok(())
//! # }
//! ```

mod bitmap;
mod error;
mod svg;
mod types;

pub use bitmap::{Bitmap, ScaleFilter};
pub use error::{RenderError, RenderResult};
pub use svg::SvgImage;
pub use types::{Color, Point, Rect, Size};
