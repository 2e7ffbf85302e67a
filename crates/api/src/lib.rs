//! Public API layer for the geospatial catalog
//!
//! This crate provides the interface consumed by the (separate) HTTP and
//! response layer:
//! - **Catalog**: every catalog-level operation, wired over one shared
//!   spatial store handle
//! - **ErrorCategory**: maps catalog errors to client-facing classes
//!   (404/409/400/500)
//! - **init_tracing**: installs the log subscriber
//!
//! ## Quick Start
//!
//! ```ignore
//! use geocatalog_api::{Catalog, CatalogConfig, Collection, SearchRequest};
//!
//! let catalog = Catalog::in_memory(CatalogConfig::default())?;
//! catalog.create_collection(Collection::new("c1")).await?;
//! let page = catalog
//!     .search_items(&SearchRequest::new().with_bbox(vec![0.0, 0.0, 10.0, 10.0]))
//!     .await?;
//! catalog.shutdown().await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod error;
pub mod telemetry;

pub use catalog::Catalog;
pub use error::ErrorCategory;
pub use telemetry::init_tracing;

// Re-export the types callers need alongside the facade
pub use geocatalog_core::{
    parse_date_interval, Collection, DatetimeFilter, EntityKind, Error, Geometry, Item,
    ItemSubmission, Link, PageToken, Result, SearchPage, SearchRequest, SortBy, SortDirection,
};
pub use geocatalog_engine::CatalogConfig;
pub use geocatalog_storage::{MemoryStore, SpatialStore, StoreError};
