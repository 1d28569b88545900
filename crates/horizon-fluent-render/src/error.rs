//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur during rasterization.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Invalid bitmap dimensions (zero width or height, or too large).
    #[error("invalid bitmap dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Raw pixel data does not match the declared dimensions.
    #[error("invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The SVG document could not be parsed by the vector renderer.
    #[error("failed to parse SVG: {0}")]
    SvgParse(String),

    /// Raster image data could not be decoded.
    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    /// A bitmap could not be encoded.
    #[error("failed to encode image: {0}")]
    ImageEncode(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
