//! MemoryStore: in-process spatial store
//!
//! Implements every [`SpatialStore`] primitive against process memory using:
//! - `DashMap<bucket, BTreeMap<id, StoredEntry>>` for ordered per-bucket storage
//! - `parking_lot::Mutex<TTLIndex>` for expiry deadlines
//! - `geo::Intersects` for exact intersection of stored and query shapes
//!
//! # Design Notes
//!
//! - **Logical expiry**: an object whose deadline has passed is hidden from
//!   reads immediately; [`MemoryStore::purge_expired`] (driven by
//!   [`ExpirySweeper`](crate::cleaner::ExpirySweeper)) reclaims it later
//! - **Writes cancel expiry**: `set_geometry`/`jset` on an id clear its
//!   pending deadline, as `SET` does on a Tile38/Redis server
//! - **Buckets**: created on first write, removed when their last object is
//!   purged or on `drop_bucket`
//! - **No spatial index**: `intersects` tests every live object of the bucket

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use geocatalog_core::Geometry;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::shape::{shapes_intersect, to_shape, Shape};
use crate::store::{ScanResult, SpatialStore, StoreError, StoreResult, StoredObject};
use crate::ttl::{ObjectRef, TTLIndex};

/// One object as held in memory
#[derive(Debug, Clone)]
struct StoredEntry {
    geometry: Option<Geometry>,
    shape: Option<Shape>,
    fields: Map<String, Value>,
    expires_at: Option<Instant>,
}

impl StoredEntry {
    fn empty() -> Self {
        Self {
            geometry: None,
            shape: None,
            fields: Map::new(),
            expires_at: None,
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| deadline > now)
    }

    fn to_object(&self, id: &str) -> StoredObject {
        StoredObject {
            id: id.to_string(),
            geometry: self.geometry.clone(),
            fields: self.fields.clone(),
        }
    }
}

/// In-process spatial store
///
/// Thread-safe; share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    buckets: DashMap<String, BTreeMap<String, StoredEntry>>,
    ttl_index: Mutex<TTLIndex>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live objects in `bucket`
    pub fn live_count(&self, bucket: &str) -> usize {
        let now = Instant::now();
        self.buckets
            .get(bucket)
            .map(|b| b.values().filter(|e| e.is_live(now)).count())
            .unwrap_or(0)
    }

    /// Number of objects waiting for an expiry deadline
    pub fn pending_expiries(&self) -> usize {
        self.ttl_index.lock().len()
    }

    /// Physically remove every object whose deadline is at or before `now`
    ///
    /// Returns the number of objects removed. Buckets left empty are removed.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let due = self.ttl_index.lock().take_expired(now);

        let mut removed = 0;
        for (deadline, object) in due {
            let mut bucket_emptied = false;
            if let Some(mut bucket) = self.buckets.get_mut(&object.bucket) {
                // Skip objects re-written or re-expired since the deadline was taken
                let still_due = bucket
                    .get(&object.id)
                    .is_some_and(|e| e.expires_at == Some(deadline));
                if still_due {
                    bucket.remove(&object.id);
                    removed += 1;
                }
                bucket_emptied = bucket.is_empty();
            }
            if bucket_emptied {
                self.buckets.remove_if(&object.bucket, |_, b| b.is_empty());
            }
        }

        if removed > 0 {
            debug!(removed, "purged expired objects");
        }
        removed
    }

    /// Apply `write` to the entry for `id`, creating bucket and entry as needed
    ///
    /// An expired-but-unpurged entry is replaced by a fresh one; a pending
    /// deadline on a live entry is cancelled.
    fn write_entry<F>(&self, bucket: &str, id: &str, write: F)
    where
        F: FnOnce(&mut StoredEntry),
    {
        let now = Instant::now();
        let mut objects = self.buckets.entry(bucket.to_string()).or_default();
        let entry = objects
            .entry(id.to_string())
            .or_insert_with(StoredEntry::empty);

        if !entry.is_live(now) {
            *entry = StoredEntry::empty();
        }
        if let Some(deadline) = entry.expires_at.take() {
            self.ttl_index
                .lock()
                .remove(deadline, &ObjectRef::new(bucket, id));
        }
        write(entry);
    }

    fn read_entry<T, F>(&self, bucket: &str, id: &str, read: F) -> StoreResult<T>
    where
        F: FnOnce(&StoredEntry) -> T,
    {
        let now = Instant::now();
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StoreError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;
        objects
            .get(id)
            .filter(|e| e.is_live(now))
            .map(read)
            .ok_or_else(|| StoreError::KeyNotFound {
                bucket: bucket.to_string(),
                id: id.to_string(),
            })
    }

    fn collect_live<F>(&self, bucket: &str, mut keep: F) -> StoreResult<ScanResult>
    where
        F: FnMut(&StoredEntry) -> bool,
    {
        let now = Instant::now();
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StoreError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;
        let matched = objects
            .iter()
            .filter(|(_, e)| e.is_live(now) && keep(*e))
            .map(|(id, e)| e.to_object(id))
            .collect();
        Ok(ScanResult::from_objects(matched))
    }
}

#[async_trait]
impl SpatialStore for MemoryStore {
    async fn set_geometry(&self, bucket: &str, id: &str, geometry: &Geometry) -> StoreResult<()> {
        let shape = to_shape(geometry)?;
        self.write_entry(bucket, id, |entry| {
            entry.geometry = Some(geometry.clone());
            entry.shape = Some(shape);
        });
        debug!(bucket, id, "set geometry");
        Ok(())
    }

    async fn jset(&self, bucket: &str, id: &str, field: &str, payload: &str) -> StoreResult<()> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| StoreError::Payload(e.to_string()))?;
        self.write_entry(bucket, id, |entry| {
            entry.fields.insert(field.to_string(), value);
        });
        debug!(bucket, id, field, "jset");
        Ok(())
    }

    async fn jget(&self, bucket: &str, id: &str) -> StoreResult<String> {
        let fields = self.read_entry(bucket, id, |e| e.fields.clone())?;
        serde_json::to_string(&fields).map_err(|e| StoreError::Payload(e.to_string()))
    }

    async fn get(&self, bucket: &str, id: &str) -> StoreResult<StoredObject> {
        self.read_entry(bucket, id, |e| e.to_object(id))
    }

    async fn scan(&self, bucket: &str) -> StoreResult<ScanResult> {
        self.collect_live(bucket, |_| true)
    }

    async fn intersects(&self, bucket: &str, shape: &Geometry) -> StoreResult<ScanResult> {
        let query = to_shape(shape)?;
        self.collect_live(bucket, |entry| {
            entry
                .shape
                .as_ref()
                .is_some_and(|stored| shapes_intersect(stored, &query))
        })
    }

    async fn expire(&self, bucket: &str, id: &str, ttl: Duration) -> StoreResult<()> {
        let now = Instant::now();
        let mut objects =
            self.buckets
                .get_mut(bucket)
                .ok_or_else(|| StoreError::BucketNotFound {
                    bucket: bucket.to_string(),
                })?;
        let entry = objects
            .get_mut(id)
            .filter(|e| e.is_live(now))
            .ok_or_else(|| StoreError::KeyNotFound {
                bucket: bucket.to_string(),
                id: id.to_string(),
            })?;

        let object = ObjectRef::new(bucket, id);
        let deadline = now + ttl;
        let mut ttl_index = self.ttl_index.lock();
        if let Some(previous) = entry.expires_at.replace(deadline) {
            ttl_index.remove(previous, &object);
        }
        ttl_index.insert(deadline, object);
        debug!(bucket, id, ttl_ms = ttl.as_millis() as u64, "expire scheduled");
        Ok(())
    }

    async fn drop_bucket(&self, bucket: &str) -> StoreResult<()> {
        self.buckets.remove(bucket);
        self.ttl_index.lock().remove_bucket(bucket);
        debug!(bucket, "dropped bucket");
        Ok(())
    }
}
