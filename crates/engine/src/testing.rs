//! Test helpers: in-memory wiring and a store that fails on demand

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use geocatalog_core::{Geometry, Item};
use geocatalog_storage::{
    MemoryStore, ScanResult, SpatialStore, StoreError, StoreResult, StoredObject,
};
use parking_lot::Mutex;

use crate::catalog::CatalogStore;
use crate::config::CatalogConfig;

/// Config with a short soft-delete expiry
pub(crate) fn test_config() -> CatalogConfig {
    CatalogConfig {
        delete_ttl_ms: 10,
        ..CatalogConfig::default()
    }
}

pub(crate) fn memory_catalog() -> (CatalogStore, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let catalog = CatalogStore::new(store.clone(), &test_config());
    (catalog, store)
}

/// Item with a square footprint `[min, max] x [min, max]`
pub(crate) fn polygon_item(id: &str, collection: &str, min: f64, max: f64) -> Item {
    let mut item = Item::new(id, collection, Geometry::bbox_polygon(min, min, max, max));
    item.bbox = Some(vec![min, min, max, max]);
    item
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreOp {
    SetGeometry,
    JSet,
    JGet,
    Expire,
}

/// Delegates to a MemoryStore, failing the selected primitive with `Unavailable`
pub(crate) struct FlakyStore {
    inner: MemoryStore,
    failing: Mutex<Option<StoreOp>>,
}

impl FlakyStore {
    pub(crate) fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            failing: Mutex::new(None),
        }
    }

    pub(crate) fn fail_on(&self, op: StoreOp) {
        *self.failing.lock() = Some(op);
    }

    pub(crate) fn recover(&self) {
        *self.failing.lock() = None;
    }

    pub(crate) fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self, op: StoreOp) -> StoreResult<()> {
        if *self.failing.lock() == Some(op) {
            return Err(StoreError::Unavailable(format!("{:?}: connection refused", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl SpatialStore for FlakyStore {
    async fn set_geometry(&self, bucket: &str, id: &str, geometry: &Geometry) -> StoreResult<()> {
        self.check(StoreOp::SetGeometry)?;
        self.inner.set_geometry(bucket, id, geometry).await
    }

    async fn jset(&self, bucket: &str, id: &str, field: &str, payload: &str) -> StoreResult<()> {
        self.check(StoreOp::JSet)?;
        self.inner.jset(bucket, id, field, payload).await
    }

    async fn jget(&self, bucket: &str, id: &str) -> StoreResult<String> {
        self.check(StoreOp::JGet)?;
        self.inner.jget(bucket, id).await
    }

    async fn get(&self, bucket: &str, id: &str) -> StoreResult<StoredObject> {
        self.inner.get(bucket, id).await
    }

    async fn scan(&self, bucket: &str) -> StoreResult<ScanResult> {
        self.inner.scan(bucket).await
    }

    async fn intersects(&self, bucket: &str, shape: &Geometry) -> StoreResult<ScanResult> {
        self.inner.intersects(bucket, shape).await
    }

    async fn expire(&self, bucket: &str, id: &str, ttl: Duration) -> StoreResult<()> {
        self.check(StoreOp::Expire)?;
        self.inner.expire(bucket, id, ttl).await
    }

    async fn drop_bucket(&self, bucket: &str) -> StoreResult<()> {
        self.inner.drop_bucket(bucket).await
    }
}
