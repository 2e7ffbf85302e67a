//! Geocatalog - geospatial item catalog over a spatial key/value store
//!
//! Geocatalog stores geospatial items (features with geometry, bounding box
//! and arbitrary metadata) grouped into collections, and answers bounding-box,
//! intersection and attribute searches against them. Records live in a
//! key/value + geometry index store reached through the [`SpatialStore`]
//! primitives.
//!
//! # Quick Start
//!
//! ```ignore
//! use geocatalog::{Catalog, CatalogConfig, Collection, Geometry, Item, SearchRequest};
//!
//! let catalog = Catalog::in_memory(CatalogConfig::default())?;
//! catalog.create_collection(Collection::new("c1")).await?;
//! catalog
//!     .create_item(Item::new("i1", "c1", Geometry::bbox_polygon(0.0, 0.0, 10.0, 10.0)))
//!     .await?;
//!
//! let page = catalog
//!     .search_items(&SearchRequest::new().with_bbox(vec![1.0, 1.0, 2.0, 2.0]))
//!     .await?;
//! assert_eq!(page.matched, Some(1));
//! ```
//!
//! # Architecture
//!
//! All operations go through [`Catalog`]. Storage engine, search and
//! transaction internals are not exposed; only the api crate is public.

// Re-export the public API from geocatalog-api
pub use geocatalog_api::*;
