//! Search Façade: filter set → store query → page
//!
//! Pipeline for one [`SearchRequest`]:
//!
//! 1. Pick the store query. A bbox wins (normalised to 2-D, queried as its
//!    polygon); otherwise an intersects geometry (a Point is widened to a
//!    small square, a Polygon is used as is, any other kind yields an empty
//!    page); otherwise the whole items bucket is scanned.
//! 2. Decode candidates and keep those passing the collections, ids and
//!    datetime filters. The survivors are counted as `matched`.
//! 3. Skip everything up to and including the page token's key, take
//!    `limit` items, and emit a token for the last one if more remain.
//!
//! Candidates arrive in ascending composite-key order, which is the only
//! order pages are served in. Sort keys are accepted but not applied.
//!
//! A candidate whose payload does not decode (a geometry-only record left by
//! an interrupted create) is dropped with a `warn!` before filtering. It is
//! neither returned nor counted in `matched`.

use geocatalog_core::geometry::point_query_polygon;
use geocatalog_core::{
    normalize_bbox, Error, Geometry, GeometryKind, Item, PageToken, Result, SearchPage,
    SearchRequest,
};
use tracing::{debug, warn};

use crate::catalog::CatalogStore;
use crate::config::CatalogConfig;

/// Store query chosen for a filter set
#[derive(Debug, Clone, PartialEq)]
enum QueryShape {
    /// Intersect the items bucket with this areal shape
    Intersect(Geometry),
    /// Scan the whole items bucket
    Scan,
    /// The geometry kind cannot be translated
    Unsupported(GeometryKind),
}

fn query_shape(request: &SearchRequest) -> Result<QueryShape> {
    if let Some(bbox) = &request.bbox {
        let [min_x, min_y, max_x, max_y] = normalize_bbox(bbox)?;
        return Ok(QueryShape::Intersect(Geometry::bbox_polygon(
            min_x, min_y, max_x, max_y,
        )));
    }

    match &request.intersects {
        Some(Geometry::Point { coordinates }) => match coordinates.as_slice() {
            [x, y, ..] => Ok(QueryShape::Intersect(point_query_polygon(*x, *y))),
            _ => Err(Error::invalid_input(
                "intersects point needs at least 2 ordinates",
            )),
        },
        Some(polygon @ Geometry::Polygon { .. }) => Ok(QueryShape::Intersect(polygon.clone())),
        Some(other) => Ok(QueryShape::Unsupported(other.kind())),
        None => Ok(QueryShape::Scan),
    }
}

/// Attribute filters applied to decoded candidates
fn passes_filters(request: &SearchRequest, item: &Item) -> bool {
    if let Some(collections) = &request.collections {
        if !collections.iter().any(|c| *c == item.collection) {
            return false;
        }
    }
    if let Some(ids) = &request.ids {
        if !ids.iter().any(|i| *i == item.id) {
            return false;
        }
    }
    if let Some(filter) = &request.datetime {
        match item.datetime() {
            Some(datetime) if filter.matches(datetime) => {}
            _ => return false,
        }
    }
    true
}

/// Search Façade
#[derive(Debug, Clone)]
pub struct ItemSearch {
    catalog: CatalogStore,
    default_limit: usize,
    max_limit: usize,
}

impl ItemSearch {
    /// Create a search façade over `catalog`
    pub fn new(catalog: CatalogStore, config: &CatalogConfig) -> Self {
        Self {
            catalog,
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        }
    }

    /// Run a search
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a bbox that is neither 4 nor 6 values or a
    /// malformed point; store failures as `StoreUnavailable`. An
    /// untranslatable geometry kind is not an error: it yields
    /// [`SearchPage::empty`].
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let limit = request.effective_limit(self.default_limit, self.max_limit);
        if !request.sortby.is_empty() {
            warn!(sortby = ?request.sortby, "sort is not applied; results stay in key order");
        }

        let candidates = match query_shape(request)? {
            QueryShape::Intersect(shape) => self.catalog.intersect_items(&shape).await?,
            QueryShape::Scan => self.catalog.scan_items().await?,
            QueryShape::Unsupported(kind) => {
                debug!(%kind, "intersects geometry kind not supported, returning empty page");
                return Ok(SearchPage::empty());
            }
        };
        let store_count = candidates.count;

        let mut matching: Vec<(String, Item)> = Vec::with_capacity(candidates.objects.len());
        for object in candidates.objects {
            let key = object.id.clone();
            match CatalogStore::decode_item(object) {
                Ok(item) if passes_filters(request, &item) => matching.push((key, item)),
                Ok(_) => {}
                Err(e) => warn!(key = %key, error = %e, "skipping undecodable item record"),
            }
        }
        let matched = matching.len();

        let after = request.token.as_ref().map(PageToken::key);
        let mut page: Vec<(String, Item)> = matching
            .into_iter()
            .filter(|(key, _)| after.map_or(true, |cursor| key.as_str() > cursor))
            .take(limit + 1)
            .collect();

        let next_token = if page.len() > limit {
            page.pop();
            page.last().map(|(key, _)| PageToken::after(key.clone()))
        } else {
            None
        };

        debug!(store_count, matched, returned = page.len(), limit, "search complete");
        Ok(SearchPage {
            items: page.into_iter().map(|(_, item)| item).collect(),
            matched: Some(matched),
            next_token,
        })
    }

    /// Page through the items of one collection
    ///
    /// # Errors
    ///
    /// `NotFound` if the collection does not exist.
    pub async fn item_collection(
        &self,
        collection_id: &str,
        limit: Option<usize>,
        token: Option<PageToken>,
    ) -> Result<SearchPage> {
        self.catalog.check_collection_exists(collection_id).await?;

        let mut request = SearchRequest::new().with_collections([collection_id]);
        request.limit = limit;
        request.token = token;
        self.search(&request).await
    }
}
