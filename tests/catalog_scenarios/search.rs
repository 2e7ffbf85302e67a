//! Search through the catalog surface

use crate::common::*;

async fn seeded() -> Catalog {
    let catalog = catalog_with_c1().await;
    catalog.create_collection(Collection::new("c2")).await.unwrap();

    let mut i1 = bbox_item("i1", "c1", [0.0, 0.0, 10.0, 10.0]);
    i1.set_property("datetime", "2020-01-01T00:00:00Z");
    let mut i2 = bbox_item("i2", "c1", [20.0, 20.0, 30.0, 30.0]);
    i2.set_property("datetime", "2022-01-01T00:00:00Z");
    let i3 = bbox_item("i3", "c2", [40.0, 40.0, 50.0, 50.0]);
    for item in [i1, i2, i3] {
        catalog.create_item(item).await.unwrap();
    }
    catalog
}

#[tokio::test]
async fn covering_bbox_finds_item_and_disjoint_finds_none() {
    let catalog = seeded().await;

    let hit = catalog
        .search_items(&SearchRequest::new().with_bbox(vec![-1.0, -1.0, 11.0, 11.0]))
        .await
        .unwrap();
    assert_eq!(page_ids(&hit), vec!["i1"]);
    assert_eq!(hit.matched, Some(1));

    let miss = catalog
        .search_items(&SearchRequest::new().with_bbox(vec![100.0, 100.0, 110.0, 110.0]))
        .await
        .unwrap();
    assert!(miss.items.is_empty());
    assert_eq!(miss.matched, Some(0));
    catalog.shutdown().await;
}

#[tokio::test]
async fn three_dimensional_bbox_search() {
    let catalog = seeded().await;
    let page = catalog
        .search_items(&SearchRequest::new().with_bbox(vec![
            25.0, 25.0, -100.0, 26.0, 26.0, 100.0,
        ]))
        .await
        .unwrap();
    assert_eq!(page_ids(&page), vec!["i2"]);
    catalog.shutdown().await;
}

#[tokio::test]
async fn point_inside_polygon_returns_exactly_that_item() {
    let catalog = seeded().await;
    let page = catalog
        .search_items(&SearchRequest::new().with_intersects(Geometry::Point {
            coordinates: vec![45.0, 45.0],
        }))
        .await
        .unwrap();
    assert_eq!(page_ids(&page), vec!["i3"]);
    assert_eq!(page.matched, Some(1));
    catalog.shutdown().await;
}

#[tokio::test]
async fn unsupported_geometry_kind_is_empty_not_error() {
    let catalog = seeded().await;
    let request = SearchRequest::new().with_intersects(Geometry::GeometryCollection {
        geometries: vec![Geometry::bbox_polygon(0.0, 0.0, 100.0, 100.0)],
    });
    let page = catalog.search_items(&request).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.matched, Some(0));
    catalog.shutdown().await;
}

#[tokio::test]
async fn collection_and_datetime_filters_narrow_results() {
    let catalog = seeded().await;

    let page = catalog
        .search_items(
            &SearchRequest::new()
                .with_bbox(vec![0.0, 0.0, 100.0, 100.0])
                .with_collections(["c1"]),
        )
        .await
        .unwrap();
    assert_eq!(page_ids(&page), vec!["i1", "i2"]);

    let page = catalog
        .search_items(
            &SearchRequest::new()
                .with_datetime("../2021-01-01T00:00:00Z")
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(page_ids(&page), vec!["i1"]);
    catalog.shutdown().await;
}

#[tokio::test]
async fn pages_cover_all_items_once() {
    let catalog = seeded().await;

    let mut seen = Vec::new();
    let mut token: Option<PageToken> = None;
    loop {
        let mut request = SearchRequest::new().with_limit(1);
        request.token = token.clone();
        let page = catalog.search_items(&request).await.unwrap();
        assert_eq!(page.matched, Some(3));
        seen.extend(page_ids(&page));
        match page.next_token {
            Some(next) => {
                // Tokens survive the opaque text form
                token = Some(PageToken::decode(&next.encode()).unwrap());
            }
            None => break,
        }
    }
    assert_eq!(seen, vec!["i1", "i2", "i3"]);
    catalog.shutdown().await;
}

#[tokio::test]
async fn malformed_token_is_rejected() {
    let err = PageToken::decode("***").unwrap_err();
    assert_eq!(ErrorCategory::of(&err).status_code(), 400);
}

#[tokio::test]
async fn item_collection_of_missing_collection_is_not_found() {
    let catalog = seeded().await;
    let err = catalog.item_collection("absent", None, None).await.unwrap_err();
    assert!(err.is_not_found());

    let page = catalog.item_collection("c2", Some(5), None).await.unwrap();
    assert_eq!(page_ids(&page), vec!["i3"]);
    catalog.shutdown().await;
}
