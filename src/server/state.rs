//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through
//! axum's state extraction. Every field is cheap to clone:
//! - `DatabaseConnection` is a connection pool (clones share the pool)
//! - `ListingCache` shares its storage behind an `Arc`
//! - `EventDispatcher` wraps a channel sender
//! - the blob store is behind an `Arc`

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    service::{cache::ListingCache, notification::EventDispatcher},
    storage::BlobStore,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// Read-through cache of listing index pages.
    pub listing_cache: ListingCache,

    /// Enqueues booking lifecycle notifications for the notification worker.
    pub events: EventDispatcher,

    /// Where uploaded media is written and served from.
    pub blob_store: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        listing_cache: ListingCache,
        events: EventDispatcher,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            db,
            listing_cache,
            events,
            blob_store,
        }
    }
}
