// SPDX-License-Identifier: MPL-2.0
//! In-memory cache of fetched photo images.
//!
//! The service hands out absolute blob URLs; a native client has to fetch
//! those bytes itself before it can render anything. Fetched images are
//! kept as decoded widget handles in an LRU keyed by URL, so scrolling the
//! grid or flipping through the preview does not refetch.

use iced::widget::image;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Number of images kept in memory.
const DEFAULT_CAPACITY: usize = 256;

pub struct ImageCache {
    entries: LruCache<String, image::Handle>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Stores the fetched bytes for a URL as a widget handle.
    pub fn insert(&mut self, url: String, bytes: Vec<u8>) {
        self.entries.put(url, image::Handle::from_bytes(bytes));
    }

    /// Looks up a URL and marks it recently used.
    pub fn get(&mut self, url: &str) -> Option<image::Handle> {
        self.entries.get(url).cloned()
    }

    /// Looks up a URL without touching recency; for use from `view`.
    pub fn peek(&self, url: &str) -> Option<image::Handle> {
        self.entries.peek(url).cloned()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_lookup_returns_a_handle() {
        let mut cache = ImageCache::new();
        cache.insert("https://blobs.example.com/a.png".into(), vec![1, 2, 3]);

        assert!(cache.contains("https://blobs.example.com/a.png"));
        assert!(cache.get("https://blobs.example.com/a.png").is_some());
        assert!(cache.peek("https://blobs.example.com/a.png").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_url_returns_none() {
        let cache = ImageCache::new();
        assert!(cache.peek("https://blobs.example.com/missing.png").is_none());
        assert!(!cache.contains("https://blobs.example.com/missing.png"));
    }

    #[test]
    fn least_recently_used_entry_is_evicted_first() {
        let mut cache = ImageCache::with_capacity(2);
        cache.insert("a".into(), vec![0]);
        cache.insert("b".into(), vec![0]);

        // Touch "a" so "b" becomes the eviction candidate.
        let _ = cache.get("a");
        cache.insert("c".into(), vec![0]);

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn peek_does_not_promote() {
        let mut cache = ImageCache::with_capacity(2);
        cache.insert("a".into(), vec![0]);
        cache.insert("b".into(), vec![0]);

        // Peeking "a" leaves it the eviction candidate.
        let _ = cache.peek("a");
        cache.insert("c".into(), vec![0]);

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut cache = ImageCache::with_capacity(0);
        cache.insert("a".into(), vec![0]);
        assert_eq!(cache.len(), 1);
    }
}
