//! SVG markup parsing and attribute rewriting.
//!
//! Recoloring an icon at runtime means editing attributes of its `path`
//! elements. [`rewrite`] does this on markup text; [`SvgDocument`] exposes
//! the parsed tree for callers that want to inspect or edit it directly.
//!
//! ```
//! use horizon_fluent::markup::{rewrite, ColorAttributes, SvgDocument, PATH_TAG};
//!
//! let svg = r#"<svg><path d="M0 0"/><path d="M1 1"/></svg>"#;
//! let out = rewrite(svg, PATH_TAG, &ColorAttributes::fill("white").with_indexes([0])).unwrap();
//!
//! let doc = SvgDocument::parse(&out).unwrap();
//! assert_eq!(doc.elements_by_tag(PATH_TAG)[0].attribute("fill"), Some("white"));
//! assert_eq!(doc.elements_by_tag(PATH_TAG)[1].attribute("fill"), None);
//! ```

mod document;
mod rewrite;

pub use document::{Declaration, SVG_TAG, SvgDocument, SvgElement, SvgNode};
pub use rewrite::{ColorAttributes, PATH_TAG, rewrite, write_svg};
