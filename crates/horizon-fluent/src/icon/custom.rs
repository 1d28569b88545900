//! Application-defined icons.

use crate::error::{Error, Result};
use crate::markup::{ColorAttributes, PATH_TAG, rewrite, write_svg};
use crate::theme::{IconColor, ThemeMode};

use super::{AssetLocator, FluentIconBase, IconContext};

/// An icon with a separate asset per theme, SVG or raster.
///
/// ```
/// use horizon_fluent::icon::{AssetLocator, FluentIconBase, IconContext, ThemedIcon};
/// use horizon_fluent::resource::ResourceManager;
/// use horizon_fluent::theme::{FixedTheme, ThemeMode};
///
/// let logo = ThemedIcon::new("app:/logo_dark_on_light.svg", "app:/logo_light_on_dark.svg");
///
/// let assets = ResourceManager::new();
/// let ctx = IconContext::new(&assets, &FixedTheme::DARK);
/// assert_eq!(
///     logo.path(ThemeMode::Auto, &ctx).unwrap(),
///     AssetLocator::from("app:/logo_light_on_dark.svg"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemedIcon {
    light: AssetLocator,
    dark: AssetLocator,
    key: Option<String>,
}

impl ThemedIcon {
    /// Create an icon from its light-theme and dark-theme assets.
    pub fn new(light: impl Into<AssetLocator>, dark: impl Into<AssetLocator>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
            key: None,
        }
    }

    /// Make the icon cacheable under `key`.
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl FluentIconBase for ThemedIcon {
    fn path(&self, theme: ThemeMode, ctx: &IconContext<'_>) -> Result<AssetLocator> {
        Ok(match ctx.icon_color(theme) {
            IconColor::Black => self.light.clone(),
            IconColor::White => self.dark.clone(),
        })
    }

    fn cache_key(&self) -> Option<String> {
        self.key.clone()
    }
}

/// A single SVG recolored per theme at resolve time.
///
/// The `path` elements of the source get the light attributes
/// (`fill="#000000"` unless replaced) or the dark attributes
/// (`fill="#FFFFFF"` unless replaced). The resolved locator is the
/// rewritten markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoloredIcon {
    source: AssetLocator,
    light: ColorAttributes,
    dark: ColorAttributes,
    key: Option<String>,
}

impl RecoloredIcon {
    /// Recolor `source`, which must be SVG.
    pub fn new(source: impl Into<AssetLocator>) -> Self {
        Self {
            source: source.into(),
            light: ColorAttributes::fill(IconColor::Black.color().to_hex()),
            dark: ColorAttributes::fill(IconColor::White.color().to_hex()),
            key: None,
        }
    }

    /// Attributes applied for light themes.
    pub fn with_light(mut self, attributes: ColorAttributes) -> Self {
        self.light = attributes;
        self
    }

    /// Attributes applied for dark themes.
    pub fn with_dark(mut self, attributes: ColorAttributes) -> Self {
        self.dark = attributes;
        self
    }

    /// Make the icon cacheable under `key`.
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl FluentIconBase for RecoloredIcon {
    fn path(&self, theme: ThemeMode, ctx: &IconContext<'_>) -> Result<AssetLocator> {
        let attributes = match ctx.icon_color(theme) {
            IconColor::Black => &self.light,
            IconColor::White => &self.dark,
        };

        let markup = match &self.source {
            AssetLocator::Path(path) => write_svg(path, ctx.assets, attributes)?,
            AssetLocator::Markup(bytes) => {
                let text = std::str::from_utf8(bytes).map_err(|e| Error::asset_load(self.source.to_string(), e.to_string()))?;
                rewrite(text, PATH_TAG, attributes)?
            }
        };

        Ok(AssetLocator::Markup(markup.into_bytes()))
    }

    fn cache_key(&self) -> Option<String> {
        self.key.clone()
    }
}
