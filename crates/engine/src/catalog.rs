//! CatalogStore: catalog records over a spatial store
//!
//! ## Design: STATELESS FACADE
//!
//! CatalogStore holds ONLY `Arc<dyn SpatialStore>` plus bucket names and the
//! soft-delete expiry. No caches, no locks. Every operation is translated
//! into one or more sequential store round trips.
//!
//! ## Layout in the store
//!
//! | record | bucket | id | geometry | attached field |
//! |--------|--------|----|----------|----------------|
//! | item | `items_bucket` | `item|collection` | item footprint | `item` |
//! | collection | `collections_bucket` | collection id | none | `collection` |
//!
//! ## Consistency
//!
//! - Guards (`Conflict` on create, `NotFound` on delete) are check-then-act
//!   and rely on the store's own consistency; two concurrent creates of the
//!   same key can both pass the guard
//! - Creating an item is two writes (geometry, then payload). If the second
//!   fails the record stays geometry-only and the store error is returned
//! - Deletes set a short expiry instead of removing. The record stays
//!   visible until the expiry elapses
//! - Listings and search skip records whose payload does not decode (such
//!   as the geometry-only record above) with a `warn!`. Such a record
//!   still blocks `create_item` on its key and makes `get_item` fail with
//!   `Serialization`

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use geocatalog_core::{make_item_key, Collection, Error, Geometry, Item, Result};
use geocatalog_storage::{ScanResult, SpatialStore, StoreError, StoredObject};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::CatalogConfig;

/// Attached field holding an item document
pub const ITEM_FIELD: &str = "item";
/// Attached field holding a collection document
pub const COLLECTION_FIELD: &str = "collection";

// =============================================================================
// Error translation
// =============================================================================

/// Translate a store error, using `not_found` for missing bucket or key
fn translate<F>(err: StoreError, not_found: F) -> Error
where
    F: FnOnce() -> Error,
{
    match err {
        StoreError::BucketNotFound { .. } | StoreError::KeyNotFound { .. } => not_found(),
        StoreError::Unavailable(reason) => Error::StoreUnavailable(reason),
        StoreError::Payload(reason) => Error::Serialization(reason),
    }
}

/// Translate a store error that has no record-level meaning
fn translate_other(err: StoreError) -> Error {
    match err {
        StoreError::Payload(reason) => Error::Serialization(reason),
        other => Error::StoreUnavailable(other.to_string()),
    }
}

/// Pull `field` out of an attached document and decode it
fn decode_field<T: DeserializeOwned>(
    mut fields: Map<String, Value>,
    field: &str,
    key: &str,
) -> Result<T> {
    let value = fields
        .remove(field)
        .ok_or_else(|| Error::Serialization(format!("record {} has no {} payload", key, field)))?;
    Ok(serde_json::from_value(value)?)
}

// =============================================================================
// CatalogStore
// =============================================================================

/// Catalog Storage Engine
///
/// Cheap to clone; clones share the store handle.
#[derive(Clone)]
pub struct CatalogStore {
    store: Arc<dyn SpatialStore>,
    items_bucket: String,
    collections_bucket: String,
    delete_ttl: Duration,
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStore")
            .field("items_bucket", &self.items_bucket)
            .field("collections_bucket", &self.collections_bucket)
            .field("delete_ttl", &self.delete_ttl)
            .finish_non_exhaustive()
    }
}

impl CatalogStore {
    /// Create a storage engine over `store`
    pub fn new(store: Arc<dyn SpatialStore>, config: &CatalogConfig) -> Self {
        Self {
            store,
            items_bucket: config.items_bucket.clone(),
            collections_bucket: config.collections_bucket.clone(),
            delete_ttl: config.delete_ttl(),
        }
    }

    /// Shared store handle
    pub fn store(&self) -> &Arc<dyn SpatialStore> {
        &self.store
    }

    /// Bucket holding items
    pub fn items_bucket(&self) -> &str {
        &self.items_bucket
    }

    /// Bucket holding collections
    pub fn collections_bucket(&self) -> &str {
        &self.collections_bucket
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Fetch one collection
    ///
    /// # Errors
    ///
    /// `NotFound` if the collection or the collections bucket is absent.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_collection(&self, collection_id: &str) -> Result<Collection> {
        let text = self
            .store
            .jget(&self.collections_bucket, collection_id)
            .await
            .map_err(|e| translate(e, || Error::collection_not_found(collection_id)))?;
        let fields: Map<String, Value> = serde_json::from_str(&text)?;
        decode_field(fields, COLLECTION_FIELD, collection_id)
    }

    /// Fail with `NotFound` unless the collection exists
    pub async fn check_collection_exists(&self, collection_id: &str) -> Result<()> {
        self.get_collection(collection_id).await.map(|_| ())
    }

    /// Every collection, in id order
    ///
    /// Full scan of the collections bucket; there is no native pagination.
    /// A missing bucket means no collections.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn list_collections(&self) -> Result<Vec<Collection>> {
        let scan = match self.store.scan(&self.collections_bucket).await {
            Ok(scan) => scan,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(translate_other(e)),
        };

        let mut collections = Vec::with_capacity(scan.count);
        for object in scan.objects {
            let id = object.id.clone();
            match decode_field(object.fields, COLLECTION_FIELD, &id) {
                Ok(collection) => collections.push(collection),
                Err(e) => warn!(collection_id = %id, error = %e, "skipping undecodable collection"),
            }
        }
        Ok(collections)
    }

    /// Create a collection
    ///
    /// # Errors
    ///
    /// `Conflict` if the id is already present.
    #[tracing::instrument(skip(self, collection), fields(collection_id = %collection.id), level = "debug")]
    pub async fn create_collection(&self, collection: &Collection) -> Result<()> {
        match self.store.jget(&self.collections_bucket, &collection.id).await {
            Ok(_) => return Err(Error::collection_conflict(&collection.id)),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(translate_other(e)),
        }
        self.put_collection(collection).await
    }

    /// Write a collection without the conflict guard
    ///
    /// Cancels a pending soft delete of the same id.
    pub async fn put_collection(&self, collection: &Collection) -> Result<()> {
        let payload = serde_json::to_string(collection)?;
        self.store
            .jset(&self.collections_bucket, &collection.id, COLLECTION_FIELD, &payload)
            .await
            .map_err(translate_other)?;
        debug!(collection_id = %collection.id, "collection written");
        Ok(())
    }

    /// Soft-delete a collection
    ///
    /// Items of the collection are left in place.
    ///
    /// # Errors
    ///
    /// `NotFound` if the collection is absent.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn delete_collection(&self, collection_id: &str) -> Result<()> {
        self.check_collection_exists(collection_id).await?;
        self.store
            .expire(&self.collections_bucket, collection_id, self.delete_ttl)
            .await
            .map_err(|e| translate(e, || Error::collection_not_found(collection_id)))
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Fetch one item
    ///
    /// # Errors
    ///
    /// `NotFound` if no item has this `(item_id, collection_id)` pair.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_item(&self, item_id: &str, collection_id: &str) -> Result<Item> {
        let key = make_item_key(item_id, collection_id);
        let text = self
            .store
            .jget(&self.items_bucket, &key)
            .await
            .map_err(|e| translate(e, || Error::item_not_found(item_id, collection_id)))?;
        let fields: Map<String, Value> = serde_json::from_str(&text)?;
        decode_field(fields, ITEM_FIELD, &key)
    }

    /// Create an item
    ///
    /// Does not check that the owning collection exists; the transaction
    /// layer does.
    ///
    /// # Errors
    ///
    /// `Conflict` if the composite key is already present. A store failure
    /// after the geometry write leaves a geometry-only record behind.
    #[tracing::instrument(
        skip(self, item),
        fields(item_id = %item.id, collection_id = %item.collection),
        level = "debug"
    )]
    pub async fn create_item(&self, item: &Item) -> Result<()> {
        let key = item.storage_key();
        match self.store.jget(&self.items_bucket, &key).await {
            Ok(_) => return Err(Error::item_conflict(&item.id, &item.collection)),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(translate_other(e)),
        }
        self.put_item(item).await
    }

    /// Write an item without the conflict guard
    ///
    /// Geometry first, then payload, both under the composite key. Cancels a
    /// pending soft delete of the same key.
    pub async fn put_item(&self, item: &Item) -> Result<()> {
        let key = item.storage_key();
        let payload = serde_json::to_string(item)?;

        self.store
            .set_geometry(&self.items_bucket, &key, &item.geometry)
            .await
            .map_err(translate_other)?;
        if let Err(e) = self
            .store
            .jset(&self.items_bucket, &key, ITEM_FIELD, &payload)
            .await
        {
            warn!(key = %key, error = %e, "payload write failed after geometry write");
            return Err(translate_other(e));
        }
        debug!(key = %key, "item written");
        Ok(())
    }

    /// Soft-delete an item
    ///
    /// # Errors
    ///
    /// `NotFound` if the key was never created (or already expired).
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn delete_item(&self, item_id: &str, collection_id: &str) -> Result<()> {
        let key = make_item_key(item_id, collection_id);
        self.store
            .expire(&self.items_bucket, &key, self.delete_ttl)
            .await
            .map_err(|e| translate(e, || Error::item_not_found(item_id, collection_id)))
    }

    // =========================================================================
    // Enumeration (used by search)
    // =========================================================================

    /// Every item record, in key order; empty if the bucket is absent
    pub async fn scan_items(&self) -> Result<ScanResult> {
        match self.store.scan(&self.items_bucket).await {
            Ok(scan) => Ok(scan),
            Err(e) if e.is_not_found() => Ok(ScanResult::default()),
            Err(e) => Err(translate_other(e)),
        }
    }

    /// Item records whose geometry intersects `shape`, in key order
    pub async fn intersect_items(&self, shape: &Geometry) -> Result<ScanResult> {
        match self.store.intersects(&self.items_bucket, shape).await {
            Ok(scan) => Ok(scan),
            Err(e) if e.is_not_found() => Ok(ScanResult::default()),
            Err(e) => Err(translate_other(e)),
        }
    }

    /// Decode the item document of a scanned record
    pub fn decode_item(object: StoredObject) -> Result<Item> {
        decode_field(object.fields, ITEM_FIELD, &object.id)
    }

    // =========================================================================
    // Reset (tests and tooling only)
    // =========================================================================

    /// Wipe the items bucket
    pub async fn drop_all_items(&self) -> Result<()> {
        warn!(bucket = %self.items_bucket, "dropping all items");
        self.store
            .drop_bucket(&self.items_bucket)
            .await
            .map_err(translate_other)
    }

    /// Wipe the collections bucket
    pub async fn drop_all_collections(&self) -> Result<()> {
        warn!(bucket = %self.collections_bucket, "dropping all collections");
        self.store
            .drop_bucket(&self.collections_bucket)
            .await
            .map_err(translate_other)
    }
}
