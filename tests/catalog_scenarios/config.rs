//! Catalog configured from a geocatalog.toml

use crate::common::*;
use tempfile::TempDir;

#[tokio::test]
async fn file_settings_drive_buckets_and_links() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("geocatalog.toml");
    std::fs::write(
        &path,
        r#"
base_url = "https://stac.example.com/api"
items_bucket = "scenes"
delete_ttl_ms = 20
sweep_interval_ms = 5
"#,
    )
    .unwrap();

    let catalog = Catalog::in_memory_from_file(&path).unwrap();
    assert_eq!(catalog.config().items_bucket, "scenes");
    assert_eq!(catalog.config().collections_bucket, "collections");

    let collection = catalog.create_collection(Collection::new("c1")).await.unwrap();
    let items = collection.links.iter().find(|l| l.rel == "items").unwrap();
    assert_eq!(items.href, "https://stac.example.com/api/collections/c1/items");

    let item = catalog
        .create_item(bbox_item("i1", "c1", [0.0, 0.0, 1.0, 1.0]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(catalog.get_item("i1", "c1").await.unwrap(), item);
    catalog.shutdown().await;
}

#[tokio::test]
async fn missing_file_is_written_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("geocatalog.toml");

    let catalog = Catalog::in_memory_from_file(&path).unwrap();
    assert!(path.exists());
    assert_eq!(catalog.config().items_bucket, "stac_items");
    catalog.shutdown().await;
}
