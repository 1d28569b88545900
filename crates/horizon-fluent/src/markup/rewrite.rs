//! Attribute rewriting over SVG markup.

use crate::error::{Error, Result};
use crate::resource::{ResourceManager, ResourcePath};

use super::document::SvgDocument;

/// The element kind recolored by default.
pub const PATH_TAG: &str = "path";

/// A set of attribute assignments plus optional target indexes.
///
/// Assignments keep insertion order. Assigning a name twice replaces the
/// earlier value in place.
///
/// ```
/// use horizon_fluent::markup::ColorAttributes;
///
/// let attrs = ColorAttributes::fill("#FFFFFF")
///     .set("stroke", "none")
///     .with_indexes([0, 2]);
///
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs.indexes(), Some(&[0, 2][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorAttributes {
    assignments: Vec<(String, String)>,
    indexes: Option<Vec<usize>>,
}

impl ColorAttributes {
    /// An empty set. Rewriting with it fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set assigning `fill`.
    pub fn fill(color: impl Into<String>) -> Self {
        Self::new().set("fill", color)
    }

    /// Add or replace an assignment.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.assignments.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.assignments.push((name, value)),
        }
        self
    }

    /// Restrict the rewrite to the elements at these zero-based positions.
    ///
    /// An empty list selects every element.
    pub fn with_indexes(mut self, indexes: impl IntoIterator<Item = usize>) -> Self {
        self.indexes = Some(indexes.into_iter().collect());
        self
    }

    /// Assignments in order.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The target indexes, if any were given.
    pub fn indexes(&self) -> Option<&[usize]> {
        self.indexes.as_deref()
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// True when there are no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ColorAttributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |attrs, (name, value)| attrs.set(name, value))
    }
}

/// Rewrite attributes of the `tag` elements in `markup`.
///
/// Returns new markup; the input is left as is.
///
/// # Errors
///
/// - [`Error::EmptyAttributes`] when `attributes` has no assignments, before
///   the markup is parsed
/// - [`Error::MalformedMarkup`] when `markup` is not an SVG document
/// - [`Error::IndexOutOfRange`] when a target index addresses no element
///
/// # Example
///
/// ```
/// use horizon_fluent::markup::{rewrite, ColorAttributes, PATH_TAG};
///
/// let svg = r#"<svg><path d="M0 0"/><path d="M1 1" fill="black"/></svg>"#;
/// let white = rewrite(svg, PATH_TAG, &ColorAttributes::fill("white")).unwrap();
/// assert_eq!(white, r#"<svg><path d="M0 0" fill="white"/><path d="M1 1" fill="white"/></svg>"#);
/// ```
pub fn rewrite(markup: &str, tag: &str, attributes: &ColorAttributes) -> Result<String> {
    if attributes.is_empty() {
        return Err(Error::EmptyAttributes);
    }

    let document = SvgDocument::parse(markup)?;
    Ok(document.with_attributes(tag, attributes)?.to_markup())
}

/// Load an SVG asset and rewrite attributes of its `path` elements.
///
/// # Errors
///
/// - [`Error::NotVectorMarkup`] when `locator` does not name an `.svg` file
/// - [`Error::AssetLoad`] when the asset cannot be read or is not UTF-8
/// - anything [`rewrite`] returns
pub fn write_svg(locator: &str, assets: &ResourceManager, attributes: &ColorAttributes) -> Result<String> {
    let is_svg = ResourcePath::parse(locator)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if !is_svg {
        return Err(Error::NotVectorMarkup {
            locator: locator.to_string(),
        });
    }

    if attributes.is_empty() {
        return Err(Error::EmptyAttributes);
    }

    let data = assets.load(locator)?;
    let markup = std::str::from_utf8(&data).map_err(|e| Error::asset_load(locator, e.to_string()))?;
    tracing::trace!(locator, "rewriting asset markup");
    rewrite(markup, PATH_TAG, attributes)
}
