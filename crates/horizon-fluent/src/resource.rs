//! Resource locators and the icon bundle.
//!
//! Assets are addressed by locator strings:
//! - `prefix:/path` resolves against a directory registered under `prefix`,
//!   either embedded at compile time or mapped onto the filesystem
//! - anything else is a plain filesystem path
//!
//! The built-in icon bundle is embedded with `include_dir!` and registered
//! under the [`FLUENT_PREFIX`] prefix, so `fluent:/icons/Home_black.svg`
//! always resolves without touching the disk.
//!
//! ```ignore
//! use horizon_fluent::resource::ResourceManager;
//!
//! let assets = ResourceManager::with_fluent_icons();
//! assets.register_filesystem_root("app", "/usr/share/my-app");
//!
//! let home = assets.load("fluent:/icons/Home_black.svg")?;
//! let logo = assets.load("app:/images/logo.png")?;
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use include_dir::{Dir, DirEntry, include_dir};
use parking_lot::RwLock;

use crate::error::{Error, Result};

/// Prefix under which the built-in icon bundle is registered.
pub const FLUENT_PREFIX: &str = "fluent";

static ICON_BUNDLE: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

static GLOBAL_MANAGER: OnceLock<ResourceManager> = OnceLock::new();

/// A directory embedded at compile time with `include_dir!`.
#[derive(Clone, Copy)]
pub struct EmbeddedDir {
    dir: &'static Dir<'static>,
}

impl EmbeddedDir {
    /// Wrap an embedded directory.
    pub const fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }

    /// The built-in icon bundle.
    pub fn fluent_icons() -> Self {
        Self::new(&ICON_BUNDLE)
    }

    /// A file's contents, or `None` if there is no such file.
    pub fn get_file(&self, path: &str) -> Option<&'static [u8]> {
        self.dir.get_file(path).map(|f| f.contents())
    }

    /// True if a file exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.dir.get_file(path).is_some()
    }

    /// All file paths, recursively, sorted.
    pub fn list_files(&self) -> Vec<&'static str> {
        let mut paths = Vec::new();
        collect_files(self.dir, &mut paths);
        paths.sort_unstable();
        paths
    }
}

fn collect_files(dir: &'static Dir<'static>, paths: &mut Vec<&'static str>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(subdir) => collect_files(subdir, paths),
            DirEntry::File(file) => {
                if let Some(path) = file.path().to_str() {
                    paths.push(path);
                }
            }
        }
    }
}

impl std::fmt::Debug for EmbeddedDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedDir")
            .field("file_count", &self.list_files().len())
            .finish()
    }
}

/// A locator split into its prefix and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath<'a> {
    /// The prefix (`fluent` in `fluent:/icons/Add_black.svg`). Empty for
    /// the default `:/` prefix and for filesystem paths.
    pub prefix: &'a str,
    /// The path under the prefix, or the whole filesystem path.
    pub path: &'a str,
    /// Whether the locator used `prefix:/path` syntax.
    pub is_prefixed: bool,
}

impl<'a> ResourcePath<'a> {
    /// Split a locator.
    ///
    /// - `"fluent:/icons/Add_black.svg"` -> prefix `fluent`, path `icons/Add_black.svg`
    /// - `":/logo.svg"` -> prefix ``, path `logo.svg`
    /// - `"/tmp/logo.svg"` -> filesystem path `/tmp/logo.svg`
    /// - `"C:/icons/logo.svg"` -> filesystem path; a single-letter prefix is
    ///   a drive letter
    pub fn parse(input: &'a str) -> Self {
        match input.split_once(":/") {
            Some((prefix, path)) if !prefix.contains('/') && !is_drive_letter(prefix) => ResourcePath {
                prefix,
                path,
                is_prefixed: true,
            },
            _ => ResourcePath {
                prefix: "",
                path: input,
                is_prefixed: false,
            },
        }
    }

    /// The file extension of the path, if any.
    pub fn extension(&self) -> Option<&'a str> {
        Path::new(self.path).extension().and_then(|e| e.to_str())
    }
}

fn is_drive_letter(prefix: &str) -> bool {
    prefix.len() == 1 && prefix.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Resolves locators to bytes.
///
/// Registries are guarded by read/write locks, so one manager can be shared
/// across threads.
pub struct ResourceManager {
    embedded: RwLock<HashMap<String, EmbeddedDir>>,
    filesystem_roots: RwLock<HashMap<String, PathBuf>>,
}

impl ResourceManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self {
            embedded: RwLock::new(HashMap::new()),
            filesystem_roots: RwLock::new(HashMap::new()),
        }
    }

    /// Create a manager with the icon bundle registered under [`FLUENT_PREFIX`].
    pub fn with_fluent_icons() -> Self {
        let manager = Self::new();
        manager.register_embedded(FLUENT_PREFIX, EmbeddedDir::fluent_icons());
        manager
    }

    /// The process-wide manager, with the icon bundle registered.
    pub fn global() -> &'static ResourceManager {
        GLOBAL_MANAGER.get_or_init(ResourceManager::with_fluent_icons)
    }

    /// Register an embedded directory under `prefix`.
    pub fn register_embedded(&self, prefix: &str, dir: EmbeddedDir) {
        tracing::debug!(prefix, "registered embedded resources");
        self.embedded.write().insert(prefix.to_string(), dir);
    }

    /// Remove an embedded directory. Returns true if one was registered.
    pub fn unregister_embedded(&self, prefix: &str) -> bool {
        self.embedded.write().remove(prefix).is_some()
    }

    /// Map `prefix` onto a filesystem directory.
    ///
    /// `data:/config.svg` then reads `{root}/config.svg`.
    pub fn register_filesystem_root(&self, prefix: &str, root: impl Into<PathBuf>) {
        let root = root.into();
        tracing::debug!(prefix, root = %root.display(), "registered filesystem root");
        self.filesystem_roots.write().insert(prefix.to_string(), root);
    }

    /// Remove a filesystem root. Returns true if one was registered.
    pub fn unregister_filesystem_root(&self, prefix: &str) -> bool {
        self.filesystem_roots.write().remove(prefix).is_some()
    }

    /// An embedded resource's bytes.
    ///
    /// Returns `None` for filesystem locators and unknown resources.
    pub fn get(&self, locator: &str) -> Option<&'static [u8]> {
        let parsed = ResourcePath::parse(locator);
        if !parsed.is_prefixed {
            return None;
        }

        self.embedded.read().get(parsed.prefix)?.get_file(parsed.path)
    }

    /// Load a resource.
    ///
    /// Embedded resources are borrowed; everything else is read from disk.
    /// A prefixed locator tries the embedded directory first, then the
    /// filesystem root registered under the same prefix.
    ///
    /// # Errors
    ///
    /// [`Error::AssetLoad`] when the resource does not exist or cannot be read.
    pub fn load(&self, locator: &str) -> Result<Cow<'static, [u8]>> {
        let parsed = ResourcePath::parse(locator);

        let full_path = if parsed.is_prefixed {
            if let Some(data) = self.get(locator) {
                tracing::trace!(locator, "loaded embedded resource");
                return Ok(Cow::Borrowed(data));
            }

            let roots = self.filesystem_roots.read();
            match roots.get(parsed.prefix) {
                Some(root) => root.join(parsed.path),
                None => return Err(Error::asset_load(locator, "resource not found")),
            }
        } else {
            PathBuf::from(parsed.path)
        };

        let data = std::fs::read(&full_path).map_err(|e| Error::asset_load(locator, e.to_string()))?;
        tracing::trace!(locator, path = %full_path.display(), "loaded resource from disk");
        Ok(Cow::Owned(data))
    }

    /// True if the resource exists.
    pub fn exists(&self, locator: &str) -> bool {
        let parsed = ResourcePath::parse(locator);
        if !parsed.is_prefixed {
            return Path::new(parsed.path).is_file();
        }

        let in_embedded = self
            .embedded
            .read()
            .get(parsed.prefix)
            .is_some_and(|dir| dir.contains(parsed.path));

        in_embedded
            || self
                .filesystem_roots
                .read()
                .get(parsed.prefix)
                .is_some_and(|root| root.join(parsed.path).is_file())
    }

    /// All embedded file paths registered under `prefix`.
    pub fn list_all(&self, prefix: &str) -> Vec<&'static str> {
        self.embedded
            .read()
            .get(prefix)
            .map(|dir| dir.list_files())
            .unwrap_or_default()
    }

    /// All registered embedded prefixes.
    pub fn embedded_prefixes(&self) -> Vec<String> {
        self.embedded.read().keys().cloned().collect()
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("embedded_prefixes", &self.embedded_prefixes())
            .field(
                "filesystem_roots",
                &self.filesystem_roots.read().keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_path_parse() {
        let p = ResourcePath::parse("fluent:/icons/Add_black.svg");
        assert_eq!(p.prefix, "fluent");
        assert_eq!(p.path, "icons/Add_black.svg");
        assert!(p.is_prefixed);
        assert_eq!(p.extension(), Some("svg"));

        let p = ResourcePath::parse(":/logo.png");
        assert_eq!(p.prefix, "");
        assert_eq!(p.path, "logo.png");
        assert!(p.is_prefixed);

        let p = ResourcePath::parse("/tmp/logo.png");
        assert_eq!(p.path, "/tmp/logo.png");
        assert!(!p.is_prefixed);

        let p = ResourcePath::parse("dir/a:/b");
        assert!(!p.is_prefixed);
    }

    #[test]
    fn test_drive_letter_is_filesystem_path() {
        for locator in ["C:/icons/a.svg", "d:/a.png"] {
            let p = ResourcePath::parse(locator);
            assert!(!p.is_prefixed, "{locator}");
            assert_eq!(p.path, locator);
        }

        let p = ResourcePath::parse("qt:/a.svg");
        assert!(p.is_prefixed);
        assert_eq!(p.prefix, "qt");
    }

    #[test]
    fn test_load_drive_letter_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("icons")).unwrap();
        std::fs::write(dir.path().join("icons/a.svg"), "<svg/>").unwrap();

        let manager = ResourceManager::new();
        manager.register_filesystem_root("C", dir.path());

        // Read as a plain path, never through the "C" root
        assert!(!manager.exists("C:/icons/a.svg"));
        let err = manager.load("C:/icons/a.svg").unwrap_err();
        assert!(matches!(err, Error::AssetLoad { ref locator, .. } if locator == "C:/icons/a.svg"));
    }

    #[test]
    fn test_bundle_registered() {
        let manager = ResourceManager::with_fluent_icons();
        assert!(manager.exists("fluent:/icons/Home_black.svg"));
        assert!(manager.exists("fluent:/icons/Home_white.svg"));
        assert!(!manager.exists("fluent:/icons/Home_gray.svg"));
        assert!(manager.get("fluent:/icons/Home_black.svg").is_some());
    }

    #[test]
    fn test_load_embedded_is_borrowed() {
        let manager = ResourceManager::with_fluent_icons();
        let data = manager.load("fluent:/icons/Add_white.svg").unwrap();
        assert!(matches!(data, Cow::Borrowed(_)));
        assert!(data.starts_with(b"<svg"));
    }

    #[test]
    fn test_load_unknown_prefix() {
        let manager = ResourceManager::new();
        let result = manager.load("nowhere:/a.svg");
        assert!(matches!(result, Err(Error::AssetLoad { .. })));
    }

    #[test]
    fn test_filesystem_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();

        let manager = ResourceManager::new();
        manager.register_filesystem_root("data", dir.path());

        assert!(manager.exists("data:/a.txt"));
        assert_eq!(&*manager.load("data:/a.txt").unwrap(), b"hello");
        assert!(manager.get("data:/a.txt").is_none());

        assert!(manager.unregister_filesystem_root("data"));
        assert!(!manager.exists("data:/a.txt"));
    }

    #[test]
    fn test_plain_filesystem_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let manager = ResourceManager::new();
        let locator = path.to_str().unwrap();
        assert!(manager.exists(locator));
        assert_eq!(&*manager.load(locator).unwrap(), &[1, 2, 3]);

        let missing = dir.path().join("missing.bin");
        assert!(matches!(
            manager.load(missing.to_str().unwrap()),
            Err(Error::AssetLoad { .. })
        ));
    }

    #[test]
    fn test_list_all() {
        let manager = ResourceManager::with_fluent_icons();
        let files = manager.list_all(FLUENT_PREFIX);
        assert!(files.contains(&"icons/Home_black.svg"));
        assert!(manager.list_all("missing").is_empty());
    }

    #[test]
    fn test_global_has_bundle() {
        assert!(ResourceManager::global().exists("fluent:/icons/Search_black.svg"));
    }
}
