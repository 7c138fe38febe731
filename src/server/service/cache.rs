//! In-memory read-through cache with tag invalidation.
//!
//! Entries expire after a fixed TTL and carry a set of tags; invalidating a tag drops
//! every entry carrying it without touching unrelated entries. Expired entries are
//! skipped on read and removed by `purge_expired`, which the cache sweep job runs.
//!
//! Each tag has a generation that `invalidate_tag` bumps. A value loaded by
//! `remember` is only stored if none of its tags were invalidated while it loaded.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::server::model::listing::PaginatedListings;

/// Tag carried by every cached listing search.
pub const LISTINGS_TAG: &str = "listings";

/// Cache of listing index pages.
pub type ListingCache = TaggedCache<PaginatedListings>;

struct Entry<V> {
    value: V,
    tags: Vec<String>,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

struct Store<V> {
    entries: HashMap<String, Entry<V>>,
    generations: HashMap<String, u64>,
}

impl<V> Store<V> {
    fn generations_of(&self, tags: &[&str]) -> Vec<u64> {
        tags.iter()
            .map(|tag| self.generations.get(*tag).copied().unwrap_or_default())
            .collect()
    }
}

/// Shared TTL cache; clones share the same storage.
pub struct TaggedCache<V> {
    store: Arc<RwLock<Store<V>>>,
    ttl: Duration,
}

impl<V> Clone for TaggedCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            ttl: self.ttl,
        }
    }
}

impl<V: Clone> TaggedCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                entries: HashMap::new(),
                generations: HashMap::new(),
            })),
            ttl,
        }
    }

    /// Returns a live entry, if any.
    pub async fn get(&self, key: &str) -> Option<V> {
        let store = self.store.read().await;
        store
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key` with the given tags, replacing any previous entry.
    pub async fn put(&self, key: &str, tags: &[&str], value: V) {
        let entry = self.entry(tags, value);
        self.store
            .write()
            .await
            .entries
            .insert(key.to_string(), entry);
    }

    /// Returns the cached value or computes, stores and returns it.
    ///
    /// No lock is held while `load` runs; concurrent misses may both load. The loaded
    /// value is always returned, but it is only stored when none of `tags` was
    /// invalidated during the load. Errors from `load` are returned and nothing is stored.
    pub async fn remember<F, Fut, E>(&self, key: &str, tags: &[&str], load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        let seen = self.store.read().await.generations_of(tags);
        let value = load().await?;

        let entry = self.entry(tags, value.clone());
        let mut store = self.store.write().await;
        if store.generations_of(tags) == seen {
            store.entries.insert(key.to_string(), entry);
        } else {
            tracing::debug!("Discarding cache load for {} invalidated mid-flight", key);
        }

        Ok(value)
    }

    /// Drops every entry carrying `tag` and bumps its generation.
    ///
    /// # Returns
    /// - `usize` - Number of entries removed
    pub async fn invalidate_tag(&self, tag: &str) -> usize {
        let mut store = self.store.write().await;
        *store.generations.entry(tag.to_string()).or_default() += 1;

        let before = store.entries.len();
        store
            .entries
            .retain(|_, entry| !entry.tags.iter().any(|t| t == tag));
        before - store.entries.len()
    }

    /// Drops expired entries.
    ///
    /// # Returns
    /// - `usize` - Number of entries removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut store = self.store.write().await;
        let before = store.entries.len();
        store.entries.retain(|_, entry| !entry.is_expired(now));
        before - store.entries.len()
    }

    /// Number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.store.read().await.entries.len()
    }

    fn entry(&self, tags: &[&str], value: V) -> Entry<V> {
        Entry {
            value,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            expires_at: Instant::now() + self.ttl,
        }
    }
}
