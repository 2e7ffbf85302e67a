//! Shared helpers for the scenario suite

#![allow(dead_code)]

use std::time::Duration;

pub use geocatalog::{
    Catalog, CatalogConfig, Collection, Error, ErrorCategory, Geometry, Item, PageToken,
    SearchPage, SearchRequest,
};

/// Soft-delete expiry used by every scenario
pub const DELETE_TTL: Duration = Duration::from_millis(20);

pub fn fast_config() -> CatalogConfig {
    CatalogConfig {
        delete_ttl_ms: DELETE_TTL.as_millis() as u64,
        sweep_interval_ms: 5,
        ..CatalogConfig::default()
    }
}

/// In-memory catalog with collection `c1` already created
pub async fn catalog_with_c1() -> Catalog {
    let catalog = Catalog::in_memory(fast_config()).unwrap();
    catalog.create_collection(Collection::new("c1")).await.unwrap();
    catalog
}

/// Item whose footprint is the polygon over `[min_x, min_y, max_x, max_y]`
pub fn bbox_item(id: &str, collection: &str, bbox: [f64; 4]) -> Item {
    let [min_x, min_y, max_x, max_y] = bbox;
    let mut item = Item::new(
        id,
        collection,
        Geometry::bbox_polygon(min_x, min_y, max_x, max_y),
    );
    item.bbox = Some(bbox.to_vec());
    item
}

/// Sleep until a soft delete issued now has certainly expired
pub async fn wait_for_expiry() {
    tokio::time::sleep(DELETE_TTL * 3).await;
}

pub fn page_ids(page: &SearchPage) -> Vec<String> {
    page.items.iter().map(|i| i.id.clone()).collect()
}
