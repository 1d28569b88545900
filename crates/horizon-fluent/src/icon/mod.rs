//! Icon resolution.
//!
//! An icon is anything implementing [`FluentIconBase`]: given a theme mode
//! it names the asset to draw. The renderer only talks to icons through this
//! trait, so applications can plug in their own icon sets next to the
//! built-in [`FluentIcon`] catalog.
//!
//! # Example
//!
//! ```
//! use horizon_fluent::icon::{AssetLocator, FluentIcon, FluentIconBase, IconContext};
//! use horizon_fluent::resource::ResourceManager;
//! use horizon_fluent::theme::{FixedTheme, ThemeMode};
//!
//! let assets = ResourceManager::with_fluent_icons();
//! let ctx = IconContext::new(&assets, &FixedTheme::DARK);
//!
//! let locator = FluentIcon::Home.path(ThemeMode::Auto, &ctx).unwrap();
//! assert_eq!(locator, AssetLocator::from("fluent:/icons/Home_white.svg"));
//! ```

mod custom;
mod fluent;

pub use custom::{RecoloredIcon, ThemedIcon};
pub use fluent::FluentIcon;

use std::borrow::Cow;
use std::fmt;

use horizon_fluent_render::Rect;

use crate::error::Result;
use crate::painter::Painter;
use crate::resource::{ResourceManager, ResourcePath};
use crate::theme::{IconColor, ThemeMode, ThemeOracle};

/// Where an icon's image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetLocator {
    /// A resource locator or filesystem path.
    Path(String),
    /// Inline SVG markup.
    Markup(Vec<u8>),
}

impl AssetLocator {
    /// The path, for path locators.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            AssetLocator::Path(path) => Some(path),
            AssetLocator::Markup(_) => None,
        }
    }

    /// True if the locator is known to hold SVG without looking at its bytes.
    ///
    /// Inline markup always is; paths are judged by their extension.
    pub fn is_svg(&self) -> bool {
        match self {
            AssetLocator::Path(path) => ResourcePath::parse(path)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("svg")),
            AssetLocator::Markup(_) => true,
        }
    }

    /// The asset bytes.
    pub fn load<'a>(&'a self, assets: &ResourceManager) -> Result<Cow<'a, [u8]>> {
        match self {
            AssetLocator::Path(path) => assets.load(path),
            AssetLocator::Markup(markup) => Ok(Cow::Borrowed(markup)),
        }
    }
}

impl From<&str> for AssetLocator {
    fn from(path: &str) -> Self {
        AssetLocator::Path(path.to_string())
    }
}

impl From<String> for AssetLocator {
    fn from(path: String) -> Self {
        AssetLocator::Path(path)
    }
}

impl fmt::Display for AssetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetLocator::Path(path) => f.write_str(path),
            AssetLocator::Markup(markup) => write!(f, "<inline svg, {} bytes>", markup.len()),
        }
    }
}

/// Services an icon may consult while resolving.
#[derive(Clone, Copy)]
pub struct IconContext<'a> {
    /// Resolves resource locators.
    pub assets: &'a ResourceManager,
    /// Answers whether the current theme is dark.
    pub oracle: &'a dyn ThemeOracle,
}

impl<'a> IconContext<'a> {
    /// Bundle the services.
    pub fn new(assets: &'a ResourceManager, oracle: &'a dyn ThemeOracle) -> Self {
        Self { assets, oracle }
    }

    /// The icon color `theme` resolves to right now.
    pub fn icon_color(&self, theme: ThemeMode) -> IconColor {
        theme.resolve(self.oracle)
    }
}

impl fmt::Debug for IconContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconContext")
            .field("assets", self.assets)
            .field("dark", &self.oracle.is_dark_theme())
            .finish()
    }
}

/// A themeable icon.
pub trait FluentIconBase {
    /// The asset to draw for `theme`.
    ///
    /// `ThemeMode::Auto` is resolved through `ctx.oracle` on every call.
    fn path(&self, theme: ThemeMode, ctx: &IconContext<'_>) -> Result<AssetLocator>;

    /// Paint the icon into `rect`.
    ///
    /// The default resolves [`path`](Self::path) and draws it as SVG or
    /// raster, whichever the asset turns out to be.
    fn render(&self, painter: &mut Painter<'_>, rect: Rect, theme: ThemeMode) -> Result<()> {
        let locator = self.path(theme, &painter.context())?;
        painter.draw_asset(&locator, rect)
    }

    /// Identity for the bitmap cache, or `None` to never cache this icon.
    ///
    /// Two icons with the same key must render identically.
    fn cache_key(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_is_svg() {
        assert!(AssetLocator::from("fluent:/icons/Add_black.svg").is_svg());
        assert!(AssetLocator::from("/tmp/A.SVG").is_svg());
        assert!(!AssetLocator::from("/tmp/a.png").is_svg());
        assert!(!AssetLocator::from("/tmp/noext").is_svg());
        assert!(AssetLocator::Markup(b"<svg/>".to_vec()).is_svg());
    }

    #[test]
    fn test_locator_display() {
        assert_eq!(AssetLocator::from("a.svg").to_string(), "a.svg");
        assert_eq!(
            AssetLocator::Markup(b"<svg/>".to_vec()).to_string(),
            "<inline svg, 6 bytes>"
        );
    }

    #[test]
    fn test_load_inline_markup() {
        let assets = ResourceManager::new();
        let locator = AssetLocator::Markup(b"<svg/>".to_vec());
        assert_eq!(&*locator.load(&assets).unwrap(), b"<svg/>");
    }
}
