//! Collection lifecycle

use crate::common::*;

#[tokio::test]
async fn collections_are_listed_in_id_order_with_links() {
    let catalog = Catalog::in_memory(fast_config()).unwrap();
    catalog.create_collection(Collection::new("zeta")).await.unwrap();
    catalog.create_collection(Collection::new("alpha")).await.unwrap();

    let collections = catalog.list_collections().await.unwrap();
    let ids: Vec<&str> = collections.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "zeta"]);

    let alpha = catalog.get_collection("alpha").await.unwrap();
    let items_link = alpha.links.iter().find(|l| l.rel == "items").unwrap();
    assert_eq!(items_link.href, "http://localhost:8080/collections/alpha/items");
    catalog.shutdown().await;
}

#[tokio::test]
async fn duplicate_collection_conflicts() {
    let catalog = catalog_with_c1().await;
    let err = catalog.create_collection(Collection::new("c1")).await.unwrap_err();
    assert_eq!(err, Error::collection_conflict("c1"));
    catalog.shutdown().await;
}

#[tokio::test]
async fn update_then_delete_collection() {
    let catalog = catalog_with_c1().await;
    let mut body = Collection::new("c1");
    body.metadata
        .insert("description".to_string(), serde_json::json!("Sentinel scenes"));
    catalog.update_collection(body).await.unwrap();

    wait_for_expiry().await;
    let stored = catalog.get_collection("c1").await.unwrap();
    assert_eq!(stored.metadata["description"], "Sentinel scenes");

    catalog.delete_collection("c1").await.unwrap();
    wait_for_expiry().await;
    assert!(catalog.get_collection("c1").await.unwrap_err().is_not_found());
    assert!(catalog.delete_collection("c1").await.unwrap_err().is_not_found());
    catalog.shutdown().await;
}

#[tokio::test]
async fn drop_all_resets_the_catalog() {
    let catalog = catalog_with_c1().await;
    catalog
        .create_item(bbox_item("i1", "c1", [0.0, 0.0, 1.0, 1.0]))
        .await
        .unwrap();

    catalog.drop_all_items().await.unwrap();
    catalog.drop_all_collections().await.unwrap();

    assert!(catalog.list_collections().await.unwrap().is_empty());
    let page = catalog.search_items(&SearchRequest::new()).await.unwrap();
    assert_eq!(page.matched, Some(0));
    catalog.shutdown().await;
}
