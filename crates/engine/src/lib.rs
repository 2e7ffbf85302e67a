//! Catalog engine
//!
//! This crate translates catalog operations into spatial store primitives:
//! - CatalogStore: the Storage Engine (records, guards, soft deletes)
//! - ItemSearch: the Search Façade (query selection, filters, pagination)
//! - Transactions: the Transaction Façade (decoration, update, bulk insert)
//! - LinkBuilder: hypermedia links below the configured base URL
//! - CatalogConfig: `geocatalog.toml` configuration
//!
//! The engine never owns the store; it receives a shared
//! `Arc<dyn SpatialStore>` at construction.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod links;
pub mod search;
pub mod transactions;

#[cfg(test)]
mod testing;

pub use catalog::{CatalogStore, COLLECTION_FIELD, ITEM_FIELD};
pub use config::{CatalogConfig, CONFIG_FILE_NAME};
pub use links::LinkBuilder;
pub use search::ItemSearch;
pub use transactions::Transactions;
