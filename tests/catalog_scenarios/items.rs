//! Item lifecycle

use crate::common::*;
use geocatalog::ItemSubmission;

#[tokio::test]
async fn create_then_get_round_trips() {
    let catalog = catalog_with_c1().await;
    let created = catalog
        .create_item(bbox_item("i1", "c1", [0.0, 0.0, 10.0, 10.0]))
        .await
        .unwrap()
        .unwrap();

    let fetched = catalog.get_item("i1", "c1").await.unwrap();
    assert_eq!(fetched, created);
    catalog.shutdown().await;
}

#[tokio::test]
async fn duplicate_create_conflicts_and_keeps_payload() {
    let catalog = catalog_with_c1().await;
    let created = catalog
        .create_item(bbox_item("i1", "c1", [0.0, 0.0, 10.0, 10.0]))
        .await
        .unwrap()
        .unwrap();

    let mut again = bbox_item("i1", "c1", [50.0, 50.0, 60.0, 60.0]);
    again.set_property("title", "impostor");
    let err = catalog.create_item(again).await.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(ErrorCategory::of(&err).status_code(), 409);

    assert_eq!(catalog.get_item("i1", "c1").await.unwrap(), created);
    catalog.shutdown().await;
}

#[tokio::test]
async fn create_in_missing_collection_is_not_found() {
    let catalog = catalog_with_c1().await;
    let err = catalog
        .create_item(bbox_item("i1", "nope", [0.0, 0.0, 1.0, 1.0]))
        .await
        .unwrap_err();
    assert_eq!(ErrorCategory::of(&err).status_code(), 404);
    catalog.shutdown().await;
}

#[tokio::test]
async fn delete_of_unknown_item_is_not_found() {
    let catalog = catalog_with_c1().await;
    let err = catalog.delete_item("ghost", "c1").await.unwrap_err();
    assert!(err.is_not_found());
    catalog.shutdown().await;
}

#[tokio::test]
async fn create_get_delete_scenario() {
    let catalog = catalog_with_c1().await;
    catalog
        .create_item(bbox_item("i1", "c1", [0.0, 0.0, 10.0, 10.0]))
        .await
        .unwrap();
    assert_eq!(catalog.get_item("i1", "c1").await.unwrap().id, "i1");

    catalog.delete_item("i1", "c1").await.unwrap();
    wait_for_expiry().await;

    let err = catalog.get_item("i1", "c1").await.unwrap_err();
    assert_eq!(err, Error::item_not_found("i1", "c1"));
    catalog.shutdown().await;
}

#[tokio::test]
async fn update_stamps_later_updated_and_persists() {
    let catalog = catalog_with_c1().await;
    let created = catalog
        .create_item(bbox_item("i1", "c1", [0.0, 0.0, 10.0, 10.0]))
        .await
        .unwrap()
        .unwrap();
    let before = created.properties["updated"].as_str().unwrap().to_string();

    let mut body = bbox_item("i1", "c1", [1.0, 1.0, 2.0, 2.0]);
    body.set_property("title", "updated body");
    let updated = catalog.update_item(body).await.unwrap();

    let after = updated.properties["updated"].as_str().unwrap();
    assert!(after >= before.as_str());
    assert_eq!(after.len(), "2024-01-01T00:00:00Z".len());
    assert!(after.ends_with('Z'));
    assert_eq!(updated.properties["created"], created.properties["created"]);

    wait_for_expiry().await;
    let stored = catalog.get_item("i1", "c1").await.unwrap();
    assert_eq!(stored.properties["title"], "updated body");
    assert_eq!(stored.geometry, Geometry::bbox_polygon(1.0, 1.0, 2.0, 2.0));
    catalog.shutdown().await;
}

#[tokio::test]
async fn feature_collection_submission_inserts_every_feature() {
    let catalog = catalog_with_c1().await;
    let submission = ItemSubmission::FeatureCollection(vec![
        bbox_item("a", "c1", [0.0, 0.0, 1.0, 1.0]),
        bbox_item("b", "c1", [2.0, 2.0, 3.0, 3.0]),
    ]);
    assert!(catalog.create_item(submission).await.unwrap().is_none());

    let page = catalog.item_collection("c1", None, None).await.unwrap();
    assert_eq!(page_ids(&page), vec!["a", "b"]);
    catalog.shutdown().await;
}

#[tokio::test]
async fn bulk_insert_keeps_items_before_failure() {
    let catalog = catalog_with_c1().await;
    catalog
        .create_item(bbox_item("b", "c1", [0.0, 0.0, 1.0, 1.0]))
        .await
        .unwrap();

    let batch = vec![
        bbox_item("a", "c1", [0.0, 0.0, 1.0, 1.0]),
        bbox_item("b", "c1", [0.0, 0.0, 1.0, 1.0]),
        bbox_item("c", "c1", [0.0, 0.0, 1.0, 1.0]),
    ];
    let err = catalog.bulk_insert_items(batch).await.unwrap_err();
    assert!(err.is_conflict());

    assert!(catalog.get_item("a", "c1").await.is_ok());
    assert!(catalog.get_item("c", "c1").await.unwrap_err().is_not_found());
    catalog.shutdown().await;
}
