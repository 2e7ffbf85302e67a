//! Storage layer for the geospatial catalog
//!
//! This crate defines the spatial store contract and its in-process
//! implementation:
//! - SpatialStore: async client trait (SET, JSET, JGET, GET, SCAN,
//!   INTERSECTS, EXPIRE, DROP)
//! - MemoryStore: DashMap + BTreeMap storage with logical expiry
//! - TTL index for expiration deadlines
//! - ExpirySweeper background task
//! - Shape conversion and exact intersection via `geo`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cleaner;
pub mod memory;
pub mod shape;
pub mod store;
pub mod ttl;

pub use cleaner::ExpirySweeper;
pub use memory::MemoryStore;
pub use shape::{shapes_intersect, to_shape, Shape};
pub use store::{ScanResult, SpatialStore, StoreError, StoreResult, StoredObject};
pub use ttl::{ObjectRef, TTLIndex};
