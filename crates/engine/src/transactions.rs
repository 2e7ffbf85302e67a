//! Transaction Façade: write operations with pre/post checks
//!
//! Every write decorates the record first (generated links, timestamps),
//! then persists it through [`CatalogStore`]. Updates are delete followed by
//! an unguarded recreate; the recreate cancels the pending soft delete, so
//! the new body is what remains once the delete expiry has elapsed. Between
//! the two steps a concurrent reader may briefly see the old body.
//!
//! No operation here is atomic. A failure partway returns the store error
//! and leaves whatever was already written.

use geocatalog_core::types::{CREATED_PROPERTY, UPDATED_PROPERTY};
use geocatalog_core::{now_rfc3339, Collection, Item, ItemSubmission, Result};
use tracing::{debug, info, warn};

use crate::catalog::CatalogStore;
use crate::links::LinkBuilder;

/// Transaction Façade
#[derive(Debug, Clone)]
pub struct Transactions {
    catalog: CatalogStore,
    links: LinkBuilder,
}

impl Transactions {
    /// Create a façade over `catalog`, generating links with `links`
    pub fn new(catalog: CatalogStore, links: LinkBuilder) -> Self {
        Self { catalog, links }
    }

    // =========================================================================
    // Preprocessing
    // =========================================================================

    /// Decorate an item for persistence
    ///
    /// Regenerates `self`/`parent`/`collection`/`root` links, sets
    /// `properties.created` if absent and always sets `properties.updated`.
    pub fn prepare_item(&self, mut item: Item) -> Result<Item> {
        let generated = self.links.item_links(&item.id, &item.collection)?;
        item.links = self.links.merge(&item.links, generated);

        let now = now_rfc3339();
        if !item.properties.contains_key(CREATED_PROPERTY) {
            item.set_property(CREATED_PROPERTY, now.clone());
        }
        item.set_property(UPDATED_PROPERTY, now);
        Ok(item)
    }

    /// Decorate a collection for persistence
    pub fn prepare_collection(&self, mut collection: Collection) -> Result<Collection> {
        let generated = self.links.collection_links(&collection.id)?;
        collection.links = self.links.merge(&collection.links, generated);
        Ok(collection)
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Create a single item or bulk-insert a feature collection
    ///
    /// Returns the stored item for a single feature and `None` for a bulk
    /// submission.
    ///
    /// # Errors
    ///
    /// `NotFound` if the owning collection is absent, `Conflict` if the
    /// item already exists.
    pub async fn create_item(&self, submission: ItemSubmission) -> Result<Option<Item>> {
        match submission {
            ItemSubmission::FeatureCollection(items) => {
                self.bulk_insert(items).await?;
                Ok(None)
            }
            ItemSubmission::Feature(item) => {
                self.catalog.check_collection_exists(&item.collection).await?;
                let item = self.prepare_item(item)?;
                self.catalog.create_item(&item).await?;
                Ok(Some(item))
            }
        }
    }

    /// Replace an item's body
    ///
    /// Stamps `properties.updated`, keeps the stored `created` when the new
    /// body has none, then deletes and recreates.
    ///
    /// # Errors
    ///
    /// `NotFound` if the collection or the item is absent.
    pub async fn update_item(&self, item: Item) -> Result<Item> {
        self.catalog.check_collection_exists(&item.collection).await?;
        let existing = self.catalog.get_item(&item.id, &item.collection).await?;

        let mut item = item;
        if !item.properties.contains_key(CREATED_PROPERTY) {
            if let Some(created) = existing.properties.get(CREATED_PROPERTY) {
                item.properties
                    .insert(CREATED_PROPERTY.to_string(), created.clone());
            }
        }
        let item = self.prepare_item(item)?;

        self.catalog.delete_item(&item.id, &item.collection).await?;
        self.catalog.put_item(&item).await?;
        debug!(item_id = %item.id, collection_id = %item.collection, "item updated");
        Ok(item)
    }

    /// Soft-delete an item
    pub async fn delete_item(&self, item_id: &str, collection_id: &str) -> Result<()> {
        self.catalog.delete_item(item_id, collection_id).await
    }

    /// Insert items one after another
    ///
    /// All items are decorated before the first write. Inserts run
    /// sequentially through the full create path; the first failure stops
    /// the batch and items already inserted stay.
    ///
    /// Returns the number of items inserted.
    pub async fn bulk_insert(&self, items: Vec<Item>) -> Result<usize> {
        let total = items.len();
        let prepared = items
            .into_iter()
            .map(|item| self.prepare_item(item))
            .collect::<Result<Vec<_>>>()?;

        let mut inserted = 0;
        for item in &prepared {
            let result = match self.catalog.check_collection_exists(&item.collection).await {
                Ok(()) => self.catalog.create_item(item).await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                warn!(
                    inserted,
                    total,
                    item_id = %item.id,
                    collection_id = %item.collection,
                    error = %e,
                    "bulk insert stopped"
                );
                return Err(e);
            }
            inserted += 1;
        }
        info!(inserted, "bulk insert complete");
        Ok(inserted)
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Create a collection
    ///
    /// # Errors
    ///
    /// `Conflict` if the id is already present.
    pub async fn create_collection(&self, collection: Collection) -> Result<Collection> {
        let collection = self.prepare_collection(collection)?;
        self.catalog.create_collection(&collection).await?;
        Ok(collection)
    }

    /// Replace a collection's body via delete then recreate
    ///
    /// # Errors
    ///
    /// `NotFound` if the collection is absent.
    pub async fn update_collection(&self, collection: Collection) -> Result<Collection> {
        let collection = self.prepare_collection(collection)?;
        self.catalog.delete_collection(&collection.id).await?;
        self.catalog.put_collection(&collection).await?;
        debug!(collection_id = %collection.id, "collection updated");
        Ok(collection)
    }

    /// Soft-delete a collection
    pub async fn delete_collection(&self, collection_id: &str) -> Result<()> {
        self.catalog.delete_collection(collection_id).await
    }
}
