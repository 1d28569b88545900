//! Rendered icon cache.
//!
//! [`IconCache`] keeps bitmaps produced by
//! [`IconRenderer::to_bitmap`](crate::renderer::IconRenderer::to_bitmap),
//! keyed by icon, theme mode and size. `ThemeMode::Auto` entries depend on
//! the theme oracle, so the cache remembers the oracle answer it was filled
//! under and drops everything when that answer changes.
//!
//! Eviction is least-recently-used once `capacity` entries are held.
//!
//! # Thread Safety
//!
//! This cache is NOT thread-safe. The renderer keeps it behind a `Mutex`.

use std::collections::HashMap;

use horizon_fluent_render::Bitmap;

use crate::theme::ThemeMode;

/// Cache key for a rendered icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconCacheKey {
    /// The icon's cache key.
    pub icon: String,
    /// The requested theme mode, unresolved.
    pub theme: ThemeMode,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl IconCacheKey {
    /// Create a key.
    pub fn new(icon: impl Into<String>, theme: ThemeMode, width: u32, height: u32) -> Self {
        Self {
            icon: icon.into(),
            theme,
            width,
            height,
        }
    }
}

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Times the cache was cleared because the theme changed.
    pub invalidations: u64,
    /// Entries currently held.
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups that hit, 0.0 when there were none.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheEntry {
    bitmap: Bitmap,
    last_used: u64,
}

/// An LRU cache of rendered icons.
pub struct IconCache {
    capacity: usize,
    entries: HashMap<IconCacheKey, CacheEntry>,
    dark: Option<bool>,
    tick: u64,
    hits: u64,
    misses: u64,
    invalidations: u64,
}

impl IconCache {
    /// Create a cache holding at most `capacity` bitmaps.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            dark: None,
            tick: 0,
            hits: 0,
            misses: 0,
            invalidations: 0,
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record the current oracle answer, clearing the cache if it changed.
    ///
    /// Returns true when entries were dropped.
    pub fn sync_theme(&mut self, dark: bool) -> bool {
        let changed = self.dark.is_some_and(|previous| previous != dark);
        self.dark = Some(dark);

        if changed && !self.entries.is_empty() {
            tracing::debug!(dark, dropped = self.entries.len(), "theme changed, clearing icon cache");
            self.entries.clear();
            self.invalidations += 1;
            return true;
        }
        false
    }

    /// Look up a bitmap.
    pub fn get(&mut self, key: &IconCacheKey) -> Option<&Bitmap> {
        self.tick += 1;
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.last_used = self.tick;
                self.hits += 1;
                Some(&entry.bitmap)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Check for a key without touching recency or counters.
    pub fn contains(&self, key: &IconCacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a bitmap, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: IconCacheKey, bitmap: Bitmap) {
        if self.capacity == 0 {
            return;
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }

        self.tick += 1;
        self.entries.insert(
            key,
            CacheEntry {
                bitmap,
                last_used: self.tick,
            },
        );
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            invalidations: self.invalidations,
            entries: self.entries.len(),
        }
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            tracing::trace!(icon = %key.icon, "evicting cached icon");
            self.entries.remove(&key);
        }
    }
}

impl std::fmt::Debug for IconCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconCache")
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}
