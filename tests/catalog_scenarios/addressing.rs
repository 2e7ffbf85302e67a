//! Composite keys and the geometry adapter

use crate::common::*;
use geocatalog_core::geometry::{bbox_to_polygon, normalize_bbox};
use geocatalog_core::make_item_key;

#[test]
fn same_item_id_in_different_collections_gets_different_keys() {
    assert_ne!(make_item_key("i", "c1"), make_item_key("i", "c2"));
    assert_eq!(make_item_key("i", "c1"), make_item_key("i", "c1"));
}

#[test]
fn bbox_polygon_is_closed_ring_from_origin() {
    let ring = bbox_to_polygon(0.0, 0.0, 10.0, 10.0);
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], vec![0.0, 0.0]);
    assert_eq!(ring.first(), ring.last());
}

#[test]
fn three_dimensional_bbox_is_projected() {
    assert_eq!(
        normalize_bbox(&[0.0, 0.0, 0.0, 10.0, 10.0, 5.0]).unwrap(),
        [0.0, 0.0, 10.0, 10.0]
    );
}

#[tokio::test]
async fn duplicate_item_ids_across_collections_do_not_collide() {
    let catalog = catalog_with_c1().await;
    catalog.create_collection(Collection::new("c2")).await.unwrap();

    let mut first = bbox_item("dup", "c1", [0.0, 0.0, 1.0, 1.0]);
    first.set_property("title", "first");
    let mut second = bbox_item("dup", "c2", [5.0, 5.0, 6.0, 6.0]);
    second.set_property("title", "second");
    catalog.create_item(first).await.unwrap();
    catalog.create_item(second).await.unwrap();

    let a = catalog.get_item("dup", "c1").await.unwrap();
    let b = catalog.get_item("dup", "c2").await.unwrap();
    assert_eq!(a.properties["title"], "first");
    assert_eq!(b.properties["title"], "second");
    catalog.shutdown().await;
}
