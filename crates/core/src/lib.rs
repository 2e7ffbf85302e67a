//! Core types for the geospatial catalog
//!
//! This crate defines the foundational types used throughout the system:
//! - Error: error taxonomy (NotFound, Conflict, Unsupported, StoreUnavailable, ...)
//! - Geometry: GeoJSON shapes and the bbox/polygon adapter
//! - Identity: composite item keys
//! - Types: Item, Collection, Link, ItemSubmission
//! - Datetime: interval parsing and timestamp stamping
//! - Search types: SearchRequest, SortBy, PageToken, SearchPage

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod datetime;
pub mod error;
pub mod geometry;
pub mod identity;
pub mod search_types;
pub mod types;

pub use datetime::{now_rfc3339, parse_date_interval, DatetimeFilter};
pub use error::{EntityKind, Error, Result};
pub use geometry::{bbox_to_polygon, normalize_bbox, point_query_polygon, Geometry, GeometryKind};
pub use identity::make_item_key;
pub use search_types::{
    parse_sortby, PageToken, SearchPage, SearchRequest, SortBy, SortDirection, DEFAULT_LIMIT,
    MAX_LIMIT,
};
pub use types::{Collection, Item, ItemSubmission, Link};
