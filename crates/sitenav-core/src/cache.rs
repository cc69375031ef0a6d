//! Navigation caching.
//!
//! Provides [`NavigationCache`] and implementations for caching a resolved
//! [`SiteNavigation`]:
//! - [`FileNavigationCache`]: JSON file keyed by an input fingerprint
//! - [`NullNavigationCache`]: No-op cache (always returns `None`)
//!
//! # Cache Format
//!
//! ```json
//! {
//!     "fingerprint": "5e8a...",
//!     "navigation": {"locales": [{"code": "en", "navbar": [], "resolved": {"collections": []}}]}
//! }
//! ```
//!
//! A cached entry is only returned when its fingerprint matches the one the
//! caller computed from the current declaration files.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::site::SiteNavigation;

const CACHE_FILE: &str = "navigation.json";

/// Fingerprint of the inputs that produced a navigation.
///
/// Hashes `version` followed by every `(name, contents)` pair in order.
#[must_use]
pub fn fingerprint<'a>(version: &str, inputs: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(version.as_bytes());
    for (name, contents) in inputs {
        hasher.update([0u8]);
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        hasher.update((contents.len() as u64).to_le_bytes());
        hasher.update(contents);
    }
    hex::encode(hasher.finalize())
}

#[derive(Serialize, Deserialize)]
struct CachedNavigation {
    fingerprint: String,
    navigation: SiteNavigation,
}

/// Trait for navigation caching implementations.
pub trait NavigationCache {
    /// Retrieve the navigation cached under `fingerprint`.
    ///
    /// Returns `None` on cache miss, stale fingerprint or invalid cache.
    fn get(&self, fingerprint: &str) -> Option<SiteNavigation>;

    /// Store a navigation under `fingerprint`.
    fn set(&self, fingerprint: &str, navigation: &SiteNavigation);

    /// Remove the cached navigation.
    fn invalidate(&self);
}

/// No-op cache used when caching is disabled.
pub struct NullNavigationCache;

impl NavigationCache for NullNavigationCache {
    fn get(&self, _fingerprint: &str) -> Option<SiteNavigation> {
        None
    }

    fn set(&self, _fingerprint: &str, _navigation: &SiteNavigation) {}

    fn invalidate(&self) {}
}

/// File-based cache storing `{cache_dir}/navigation.json`.
pub struct FileNavigationCache {
    cache_dir: PathBuf,
}

impl FileNavigationCache {
    /// Create a cache writing into `cache_dir`.
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    fn cache_path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE)
    }
}

impl NavigationCache for FileNavigationCache {
    fn get(&self, fingerprint: &str) -> Option<SiteNavigation> {
        let content = fs::read_to_string(self.cache_path()).ok()?;
        let cached: CachedNavigation = match serde_json::from_str(&content) {
            Ok(cached) => cached,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable navigation cache");
                return None;
            }
        };
        if cached.fingerprint != fingerprint {
            tracing::debug!("Navigation cache is stale");
            return None;
        }
        Some(cached.navigation)
    }

    fn set(&self, fingerprint: &str, navigation: &SiteNavigation) {
        if let Err(e) = fs::create_dir_all(&self.cache_dir) {
            tracing::debug!(error = %e, "Failed to create cache directory");
            return;
        }

        let cached = CachedNavigation {
            fingerprint: fingerprint.to_owned(),
            navigation: navigation.clone(),
        };
        let content = match serde_json::to_string(&cached) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to serialize navigation");
                return;
            }
        };

        if let Err(e) = fs::write(self.cache_path(), content) {
            tracing::warn!(error = %e, "Failed to write navigation cache");
        }
    }

    fn invalidate(&self) {
        let cache_path = self.cache_path();
        if cache_path.exists()
            && let Err(e) = fs::remove_file(&cache_path)
        {
            tracing::debug!(error = %e, "Failed to remove navigation cache");
        }
    }
}
