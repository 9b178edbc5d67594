/*!
 * Translation caching functionality.
 *
 * This module provides caching of provider results to avoid redundant
 * API calls. Entries live in the shared key/value store so they survive
 * between runs when a persistent store is used.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use log::{debug, warn};

use crate::database::KeyValueStore;

/// Translation cache for storing and retrieving translations
#[derive(Clone)]
pub struct TranslationCache {
    /// Backing store shared with the rest of the process
    store: Arc<dyn KeyValueStore>,

    /// Cache hit counter
    hits: Arc<AtomicUsize>,

    /// Cache miss counter
    misses: Arc<AtomicUsize>,

    /// Whether caching is enabled
    enabled: bool,
}

impl TranslationCache {
    /// Create a new translation cache on top of `store`
    pub fn new(store: Arc<dyn KeyValueStore>, enabled: bool) -> Self {
        Self {
            store,
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            enabled,
        }
    }

    /// Storage key for a source text and target language
    pub fn key(source_text: &str, target_language: &str) -> String {
        format!("{}_{}", source_text, target_language)
    }

    /// Get a translation from the cache
    ///
    /// Store failures are logged and treated as a miss.
    pub fn get(&self, source_text: &str, target_language: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        match self.store.get(&Self::key(source_text, target_language)) {
            Ok(Some(translation)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for '{}' (-> {})", truncate_text(source_text, 30), target_language);
                Some(translation)
            }
            Ok(None) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for '{}' (-> {})", truncate_text(source_text, 30), target_language);
                None
            }
            Err(e) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                warn!("Cache lookup failed: {}", e);
                None
            }
        }
    }

    /// Store a translation in the cache
    pub fn store(&self, source_text: &str, target_language: &str, translation: &str) {
        if !self.enabled {
            return;
        }

        if let Err(e) = self.store.set(&Self::key(source_text, target_language), translation) {
            warn!("Failed to cache translation: {}", e);
            return;
        }

        debug!("Cached translation for '{}' (-> {})", truncate_text(source_text, 30), target_language);
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Check if the cache is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
