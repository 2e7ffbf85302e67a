//! Spatial store client contract
//!
//! The catalog consumes its backing store only through the primitives of
//! [`SpatialStore`]. A bucket is a named namespace (one for items, one for
//! collections); every object in a bucket is addressed by a string id and
//! may carry a geometry, an attached JSON document, or both.
//!
//! # Ordering
//!
//! `scan` and `intersects` return objects in ascending id order. The
//! catalog's page tokens depend on this.
//!
//! # Writes and expiry
//!
//! Any write (`set_geometry` or `jset`) to an id cancels a pending expiry on
//! that id. An expired object is no longer returned by any read.

use std::time::Duration;

use async_trait::async_trait;
use geocatalog_core::Geometry;
use serde_json::{Map, Value};
use thiserror::Error;

/// Result type alias for store primitives
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors signalled by a spatial store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The bucket does not exist
    #[error("key not found: {bucket}")]
    BucketNotFound {
        /// Bucket that was addressed
        bucket: String,
    },

    /// The id does not exist in the bucket
    #[error("id not found: {id} in {bucket}")]
    KeyNotFound {
        /// Bucket that was addressed
        bucket: String,
        /// Id that was addressed
        id: String,
    },

    /// Transport or connection failure
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected a payload or geometry
    #[error("invalid payload: {0}")]
    Payload(String),
}

impl StoreError {
    /// Returns true for `BucketNotFound` and `KeyNotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::BucketNotFound { .. } | StoreError::KeyNotFound { .. }
        )
    }
}

/// A raw object as returned by `get`, `scan` and `intersects`
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    /// Object id within its bucket
    pub id: String,
    /// Indexed geometry, if one was set
    pub geometry: Option<Geometry>,
    /// Attached JSON document, field name → value
    pub fields: Map<String, Value>,
}

/// Result of an enumerating primitive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    /// Number of objects matched
    pub count: usize,
    /// Matched objects in ascending id order
    pub objects: Vec<StoredObject>,
}

impl ScanResult {
    /// Build a result from objects, deriving the count
    pub fn from_objects(objects: Vec<StoredObject>) -> Self {
        Self {
            count: objects.len(),
            objects,
        }
    }
}

/// Key/value + geometry index store
///
/// One long-lived handle is shared by every request task; implementations
/// must be safe to call concurrently. Each method is a single round trip.
#[async_trait]
pub trait SpatialStore: Send + Sync {
    /// Index `geometry` under `id`, creating the object if needed
    async fn set_geometry(&self, bucket: &str, id: &str, geometry: &Geometry) -> StoreResult<()>;

    /// Attach JSON text `payload` to `id` under `field`
    ///
    /// Creates a geometry-less object if `id` does not exist.
    async fn jset(&self, bucket: &str, id: &str, field: &str, payload: &str) -> StoreResult<()>;

    /// Fetch the attached JSON document of `id` as text
    async fn jget(&self, bucket: &str, id: &str) -> StoreResult<String>;

    /// Fetch the raw object (geometry and attached document)
    async fn get(&self, bucket: &str, id: &str) -> StoreResult<StoredObject>;

    /// Enumerate every object in `bucket`
    async fn scan(&self, bucket: &str) -> StoreResult<ScanResult>;

    /// Enumerate objects whose geometry intersects `shape`
    async fn intersects(&self, bucket: &str, shape: &Geometry) -> StoreResult<ScanResult>;

    /// Schedule removal of `id` after `ttl`
    async fn expire(&self, bucket: &str, id: &str, ttl: Duration) -> StoreResult<()>;

    /// Remove the whole bucket
    async fn drop_bucket(&self, bucket: &str) -> StoreResult<()>;
}
