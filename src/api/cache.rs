//
//  teamcity-cli
//  api/cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Cache
//!
//! An opt-in store of raw GET response bodies, keyed by the absolute request
//! URL (which already contains the `fields` and `locator` query) and the
//! requested content type.
//!
//! ## Notes
//!
//! - Disabled by default. While disabled, [`ResponseCache::put`] is a no-op
//!   and [`ResponseCache::try_get`] always misses.
//! - Disabling clears every entry; re-enabling starts empty.
//! - Entries never expire. The store grows until it is disabled or
//!   invalidated; the client invalidates it after every write.
//! - Each client owns its own store. Sharing requires passing the same
//!   `Arc<ResponseCache>` to several clients explicitly.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::common::ContentType;

/// Identity of a cached response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    url: String,
    accept: ContentType,
}

impl CacheKey {
    pub fn new(url: impl Into<String>, accept: ContentType) -> Self {
        Self {
            url: url.into(),
            accept,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn accept(&self) -> ContentType {
        self.accept
    }
}

/// A stored response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub retrieved_at: DateTime<Utc>,
}

impl CacheEntry {
    /// An entry stamped with the current time.
    pub fn new(body: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            body,
            content_type,
            retrieved_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    enabled: bool,
    entries: HashMap<CacheKey, CacheEntry>,
}

/// Thread-safe response store.
///
/// # Example
///
/// ```rust
/// use teamcity_cli::api::cache::{CacheEntry, CacheKey, ResponseCache};
/// use teamcity_cli::api::common::ContentType;
///
/// let cache = ResponseCache::new();
/// let key = CacheKey::new("http://ci/app/rest/server", ContentType::Json);
///
/// cache.put(key.clone(), CacheEntry::new(b"{}".to_vec(), None));
/// assert!(cache.try_get(&key).is_none()); // disabled
///
/// cache.enable();
/// cache.put(key.clone(), CacheEntry::new(b"{}".to_vec(), None));
/// assert!(cache.try_get(&key).is_some());
///
/// cache.disable();
/// assert_eq!(cache.len(), 0);
/// ```
#[derive(Debug, Default)]
pub struct ResponseCache {
    state: Mutex<CacheState>,
}

impl ResponseCache {
    /// Creates a disabled, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // A panic while holding the lock cannot leave the map half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn enable(&self) {
        self.lock().enabled = true;
    }

    /// Disables the cache and drops every entry.
    pub fn disable(&self) {
        let mut state = self.lock();
        state.enabled = false;
        state.entries.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    pub fn try_get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let state = self.lock();
        if !state.enabled {
            return None;
        }
        state.entries.get(key).cloned()
    }

    /// Stores an entry. Does nothing while disabled.
    pub fn put(&self, key: CacheKey, entry: CacheEntry) {
        let mut state = self.lock();
        if state.enabled {
            state.entries.insert(key, entry);
        }
    }

    /// Drops every entry, leaving the enabled flag as it is.
    pub fn invalidate(&self) {
        self.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
