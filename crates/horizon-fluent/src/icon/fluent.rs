//! The built-in icon catalog.

use std::fmt;

use crate::error::{Error, Result};
use crate::resource::{FLUENT_PREFIX, ResourceManager};
use crate::theme::{IconColor, ThemeMode};

use super::{AssetLocator, FluentIconBase, IconContext};

/// Directory of the icon bundle under [`FLUENT_PREFIX`].
const ICON_DIR: &str = "icons";

macro_rules! fluent_icons {
    ($($variant:ident => $name:literal,)+) => {
        /// A built-in Fluent icon.
        ///
        /// Every icon ships as two SVG files in the bundle,
        /// `{name}_black.svg` for light themes and `{name}_white.svg` for
        /// dark themes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum FluentIcon {
            $(
                #[doc = concat!("The `", $name, "` icon.")]
                $variant,
            )+
        }

        impl FluentIcon {
            /// Every icon in the catalog, in declaration order.
            pub const ALL: &'static [FluentIcon] = &[$(FluentIcon::$variant,)+];

            /// The stable asset name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(FluentIcon::$variant => $name,)+
                }
            }
        }
    };
}

fluent_icons! {
    Add => "Add",
    Cut => "Cut",
    Pin => "Pin",
    Tag => "Tag",
    Web => "Web",
    Chat => "Chat",
    Copy => "Copy",
    Code => "Code",
    Edit => "Edit",
    Font => "Font",
    Help => "Help",
    Home => "Home",
    Info => "Info",
    Link => "Link",
    Mail => "Mail",
    Menu => "Menu",
    More => "More",
    Send => "Send",
    Sync => "Sync",
    Zoom => "Zoom",
    Album => "Album",
    Brush => "Brush",
    Close => "Close",
    Embed => "Embed",
    Heart => "Heart",
    Movie => "Movie",
    Music => "Music",
    Photo => "Photo",
    Phone => "Phone",
    Video => "Video",
    Paste => "Paste",
    Camera => "Camera",
    Cancel => "Cancel",
    Folder => "Folder",
    Scroll => "Scroll",
    Layout => "Layout",
    GitHub => "GitHub",
    Search => "Search",
    Update => "Update",
    Return => "Return",
    ZoomIn => "ZoomIn",
    Setting => "Setting",
    Palette => "Palette",
    Message => "Message",
    ZoomOut => "ZoomOut",
    Feedback => "Feedback",
    Minimize => "Minimize",
    CheckBox => "CheckBox",
    Document => "Document",
    Language => "Language",
    Download => "Download",
    Question => "Question",
    SendFill => "SendFill",
    Completed => "Completed",
    // Asset name keeps the bundle's spelling.
    Contract => "Constract",
    Alignment => "Alignment",
    BookShelf => "BookShelf",
    PencilInk => "PencilInk",
    FolderAdd => "FolderAdd",
    Microphone => "Microphone",
    ArrowDown => "ChevronDown",
    Transparent => "Transparent",
    MusicFolder => "MusicFolder",
    ChevronRight => "ChevronRight",
    BackgroundFill => "BackgroundColor",
    FluorescentPen => "FluorescentPen",
}

impl FluentIcon {
    /// Look an icon up by its asset name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|icon| icon.name() == name)
    }

    /// The resource locator of one of the icon's variants.
    pub fn locator(self, color: IconColor) -> String {
        format!("{FLUENT_PREFIX}:/{ICON_DIR}/{}_{}.svg", self.name(), color.suffix())
    }

    /// Recover the icon and variant from a locator built by [`locator`](Self::locator).
    pub fn from_locator(locator: &str) -> Option<(Self, IconColor)> {
        let file = locator
            .strip_prefix(FLUENT_PREFIX)?
            .strip_prefix(":/")?
            .strip_prefix(ICON_DIR)?
            .strip_prefix('/')?
            .strip_suffix(".svg")?;
        let (name, suffix) = file.rsplit_once('_')?;
        Some((Self::from_name(name)?, IconColor::from_suffix(suffix)?))
    }

    /// Check that `assets` holds both variants of every icon.
    ///
    /// # Errors
    ///
    /// [`Error::MissingVariant`] for the first variant not found.
    pub fn verify_bundle(assets: &ResourceManager) -> Result<()> {
        for &icon in Self::ALL {
            for color in [IconColor::Black, IconColor::White] {
                icon.ensure_variant(assets, color)?;
            }
        }
        tracing::debug!(icons = Self::ALL.len(), "verified icon bundle");
        Ok(())
    }

    fn ensure_variant(self, assets: &ResourceManager, color: IconColor) -> Result<String> {
        let locator = self.locator(color);
        if !assets.exists(&locator) {
            return Err(Error::MissingVariant {
                icon: self.name(),
                color,
            });
        }
        Ok(locator)
    }
}

impl FluentIconBase for FluentIcon {
    fn path(&self, theme: ThemeMode, ctx: &IconContext<'_>) -> Result<AssetLocator> {
        let color = ctx.icon_color(theme);
        let locator = self.ensure_variant(ctx.assets, color)?;
        tracing::trace!(icon = self.name(), %theme, %color, "resolved icon");
        Ok(AssetLocator::Path(locator))
    }

    fn cache_key(&self) -> Option<String> {
        Some(format!("{FLUENT_PREFIX}:{}", self.name()))
    }
}

impl fmt::Display for FluentIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::theme::FixedTheme;

    #[test]
    fn test_catalog_size() {
        assert_eq!(FluentIcon::ALL.len(), 66);
        let names: HashSet<_> = FluentIcon::ALL.iter().map(|i| i.name()).collect();
        assert_eq!(names.len(), 66);
    }

    #[test]
    fn test_locator_format() {
        assert_eq!(FluentIcon::Home.locator(IconColor::Black), "fluent:/icons/Home_black.svg");
        assert_eq!(
            FluentIcon::ArrowDown.locator(IconColor::White),
            "fluent:/icons/ChevronDown_white.svg"
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(FluentIcon::from_name("GitHub"), Some(FluentIcon::GitHub));
        assert_eq!(FluentIcon::from_name("Constract"), Some(FluentIcon::Contract));
        assert_eq!(FluentIcon::from_name("github"), None);
    }

    #[test]
    fn test_from_locator() {
        assert_eq!(
            FluentIcon::from_locator("fluent:/icons/BackgroundColor_white.svg"),
            Some((FluentIcon::BackgroundFill, IconColor::White))
        );
        assert_eq!(FluentIcon::from_locator("fluent:/icons/Home_gray.svg"), None);
        assert_eq!(FluentIcon::from_locator("other:/icons/Home_black.svg"), None);
        assert_eq!(FluentIcon::from_locator("fluent:/icons/Home_black.png"), None);
    }

    #[test]
    fn test_bundle_complete() {
        let assets = ResourceManager::with_fluent_icons();
        FluentIcon::verify_bundle(&assets).unwrap();
    }

    #[test]
    fn test_missing_variant() {
        let empty = ResourceManager::new();
        let ctx = IconContext::new(&empty, &FixedTheme::LIGHT);

        let err = FluentIcon::Home.path(ThemeMode::Dark, &ctx).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingVariant {
                icon: "Home",
                color: IconColor::White
            }
        ));
        assert!(FluentIcon::verify_bundle(&empty).is_err());
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(FluentIcon::Add.cache_key().as_deref(), Some("fluent:Add"));
        assert_ne!(FluentIcon::Add.cache_key(), FluentIcon::Cut.cache_key());
    }
}
