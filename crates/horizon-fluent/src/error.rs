//! Error types for the icon subsystem.

use std::path::PathBuf;

use horizon_fluent_render::RenderError;

use crate::theme::IconColor;

/// Result type alias for icon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, rewriting or rendering icons.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not well-formed SVG markup.
    #[error("malformed SVG markup at byte {position}: {message}")]
    MalformedMarkup { message: String, position: u64 },

    /// An attribute rewrite was requested with no assignments.
    #[error("attribute rewrite requires at least one assignment")]
    EmptyAttributes,

    /// A target index does not address a matched element.
    #[error("element index {index} out of range ({count} matched elements)")]
    IndexOutOfRange { index: usize, count: usize },

    /// The asset handed to the markup rewriter is not vector markup.
    #[error("'{locator}' is not an SVG asset")]
    NotVectorMarkup { locator: String },

    /// An asset could not be read or decoded.
    #[error("failed to load asset '{locator}': {message}")]
    AssetLoad { locator: String, message: String },

    /// A built-in icon is missing one of its packaged theme variants.
    #[error("icon bundle is missing the {color} variant of '{icon}'")]
    MissingVariant { icon: &'static str, color: IconColor },

    /// Rasterization failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// File I/O error.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a malformed markup error.
    pub fn malformed(message: impl Into<String>, position: u64) -> Self {
        Self::MalformedMarkup {
            message: message.into(),
            position,
        }
    }

    /// Create an asset load error.
    pub fn asset_load(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssetLoad {
            locator: locator.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
