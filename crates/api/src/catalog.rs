//! Catalog: the outward catalog-level surface
//!
//! One `Catalog` per process. It is built once during explicit
//! initialisation around a shared store handle and then handed to request
//! handlers (wrap it in an `Arc`); it is never looked up globally.
//!
//! | operation | delegates to |
//! |-----------|--------------|
//! | `get_collection`, `list_collections`, `get_item`, `drop_all_*` | [`CatalogStore`] |
//! | `search_items`, `item_collection` | [`ItemSearch`] |
//! | `create_*`, `update_*`, `delete_*`, `bulk_insert_items` | [`Transactions`] |

use std::path::Path;
use std::sync::Arc;

use geocatalog_core::{
    Collection, Error, Item, ItemSubmission, PageToken, Result, SearchPage, SearchRequest,
};
use geocatalog_engine::{CatalogConfig, CatalogStore, ItemSearch, LinkBuilder, Transactions};
use geocatalog_storage::{ExpirySweeper, MemoryStore, SpatialStore};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Background sweeper owned by an in-memory catalog
struct SweeperTask {
    sweeper: ExpirySweeper,
    handle: JoinHandle<()>,
}

/// Catalog service facade
pub struct Catalog {
    config: CatalogConfig,
    store: CatalogStore,
    search: ItemSearch,
    transactions: Transactions,
    sweeper: Mutex<Option<SweeperTask>>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Catalog {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Wire a catalog over an existing store handle
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the configuration does not validate.
    pub fn new(store: Arc<dyn SpatialStore>, mut config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        let links = LinkBuilder::new(config.base_url()?)?;
        let catalog_store = CatalogStore::new(store, &config);

        info!(
            store_url = %config.store_url,
            base_url = %config.base_url,
            items_bucket = %config.items_bucket,
            collections_bucket = %config.collections_bucket,
            "catalog ready"
        );
        Ok(Self {
            search: ItemSearch::new(catalog_store.clone(), &config),
            transactions: Transactions::new(catalog_store.clone(), links),
            store: catalog_store,
            config,
            sweeper: Mutex::new(None),
        })
    }

    /// Catalog over a fresh in-process store
    ///
    /// Starts the store's expiry sweeper on the current tokio runtime; call
    /// [`shutdown`](Self::shutdown) to stop it.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the configuration does not validate,
    /// `StoreUnavailable` if no tokio runtime is running.
    pub fn in_memory(config: CatalogConfig) -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let catalog = Self::new(store.clone(), config)?;

        let sweeper = ExpirySweeper::new(store, catalog.config.sweep_interval());
        let handle = sweeper
            .start()
            .map_err(|e| Error::store_unavailable(e.to_string()))?;
        *catalog.sweeper.lock() = Some(SweeperTask { sweeper, handle });
        Ok(catalog)
    }

    /// In-memory catalog configured from a `geocatalog.toml`
    ///
    /// Writes the default file if `path` does not exist, then applies
    /// environment overrides.
    pub fn in_memory_from_file(path: &Path) -> Result<Self> {
        CatalogConfig::write_default_if_missing(path)?;
        let mut config = CatalogConfig::from_file(path)?;
        config.apply_env()?;
        Self::in_memory(config)
    }

    /// Stop background tasks
    ///
    /// Idempotent. Catalogs over an external store have nothing to stop.
    pub async fn shutdown(&self) {
        let task = self.sweeper.lock().take();
        if let Some(task) = task {
            task.sweeper.shutdown();
            if let Err(e) = task.handle.await {
                warn!(error = %e, "expiry sweeper ended abnormally");
            }
            info!("catalog shut down");
        }
    }

    /// Effective configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetch one collection
    pub async fn get_collection(&self, collection_id: &str) -> Result<Collection> {
        self.store.get_collection(collection_id).await
    }

    /// Every collection, in id order
    pub async fn list_collections(&self) -> Result<Vec<Collection>> {
        self.store.list_collections().await
    }

    /// Fetch one item by `(item_id, collection_id)`
    pub async fn get_item(&self, item_id: &str, collection_id: &str) -> Result<Item> {
        self.store.get_item(item_id, collection_id).await
    }

    /// Search items with a filter set
    pub async fn search_items(&self, request: &SearchRequest) -> Result<SearchPage> {
        self.search.search(request).await
    }

    /// Page through one collection's items
    pub async fn item_collection(
        &self,
        collection_id: &str,
        limit: Option<usize>,
        token: Option<PageToken>,
    ) -> Result<SearchPage> {
        self.search.item_collection(collection_id, limit, token).await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Create an item, or bulk-insert a feature collection (returns `None`)
    pub async fn create_item(&self, submission: impl Into<ItemSubmission>) -> Result<Option<Item>> {
        self.transactions.create_item(submission.into()).await
    }

    /// Replace an item's body
    pub async fn update_item(&self, item: Item) -> Result<Item> {
        self.transactions.update_item(item).await
    }

    /// Soft-delete an item
    pub async fn delete_item(&self, item_id: &str, collection_id: &str) -> Result<()> {
        self.transactions.delete_item(item_id, collection_id).await
    }

    /// Create a collection
    pub async fn create_collection(&self, collection: Collection) -> Result<Collection> {
        self.transactions.create_collection(collection).await
    }

    /// Replace a collection's body
    pub async fn update_collection(&self, collection: Collection) -> Result<Collection> {
        self.transactions.update_collection(collection).await
    }

    /// Soft-delete a collection
    pub async fn delete_collection(&self, collection_id: &str) -> Result<()> {
        self.transactions.delete_collection(collection_id).await
    }

    /// Insert items sequentially; returns how many were inserted
    pub async fn bulk_insert_items(&self, items: Vec<Item>) -> Result<usize> {
        self.transactions.bulk_insert(items).await
    }

    // =========================================================================
    // Reset (tests and tooling only)
    // =========================================================================

    /// Wipe every item
    pub async fn drop_all_items(&self) -> Result<()> {
        self.store.drop_all_items().await
    }

    /// Wipe every collection
    pub async fn drop_all_collections(&self) -> Result<()> {
        self.store.drop_all_collections().await
    }
}
