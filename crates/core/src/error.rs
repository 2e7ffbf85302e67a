//! Error types for the catalog
//!
//! This module defines the error taxonomy shared by every layer above the
//! spatial store. We use `thiserror` for automatic `Display` and `Error`
//! trait implementations.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `NotFound` | referenced collection or item is absent |
//! | `Conflict` | create attempted on an id that is already present |
//! | `Unsupported` | a request needs a translation the engine cannot make |
//! | `StoreUnavailable` | transport/connection failure from the store client |
//! | `Serialization` | a stored payload cannot be encoded or decoded |
//! | `InvalidInput` | malformed bbox, page token, datetime or configuration |

use std::fmt;
use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of catalog record an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A catalog collection
    Collection,
    /// An item inside a collection
    Item,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Collection => write!(f, "Collection"),
            EntityKind::Item => write!(f, "Item"),
        }
    }
}

/// Error types for the catalog
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// What kind of record was addressed
        entity: EntityKind,
        /// Human-readable identity of the record
        id: String,
    },

    /// Record already exists
    #[error("{entity} {id} already exists")]
    Conflict {
        /// What kind of record was addressed
        entity: EntityKind,
        /// Human-readable identity of the record
        id: String,
    },

    /// Requested translation is not supported
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Store transport or connection failure
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Payload encoding/decoding failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Item `item_id` is absent from `collection_id`
    pub fn item_not_found(item_id: &str, collection_id: &str) -> Self {
        Error::NotFound {
            entity: EntityKind::Item,
            id: format!("{} in collection {}", item_id, collection_id),
        }
    }

    /// Collection `collection_id` is absent
    pub fn collection_not_found(collection_id: &str) -> Self {
        Error::NotFound {
            entity: EntityKind::Collection,
            id: collection_id.to_string(),
        }
    }

    /// Item `item_id` already exists in `collection_id`
    pub fn item_conflict(item_id: &str, collection_id: &str) -> Self {
        Error::Conflict {
            entity: EntityKind::Item,
            id: format!("{} in collection {}", item_id, collection_id),
        }
    }

    /// Collection `collection_id` already exists
    pub fn collection_conflict(collection_id: &str) -> Self {
        Error::Conflict {
            entity: EntityKind::Collection,
            id: collection_id.to_string(),
        }
    }

    /// Build an `InvalidInput` error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput(reason.into())
    }

    /// Build a `StoreUnavailable` error
    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Error::StoreUnavailable(reason.into())
    }

    /// Returns true for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns true for `Conflict`
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_item_not_found() {
        let err = Error::item_not_found("i1", "c1");
        let msg = err.to_string();
        assert_eq!(msg, "Item i1 in collection c1 not found");
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_error_display_collection_conflict() {
        let err = Error::collection_conflict("c1");
        assert_eq!(err.to_string(), "Collection c1 already exists");
        assert!(err.is_conflict());
    }

    #[test]
    fn test_error_display_store_unavailable() {
        let err = Error::store_unavailable("connection refused");
        let msg = err.to_string();
        assert!(msg.contains("Store unavailable"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let result: Result<serde_json::Value> =
            serde_json::from_str("{not json").map_err(Error::from);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_error_pattern_matching() {
        match Error::item_conflict("dup", "c2") {
            Error::Conflict { entity, id } => {
                assert_eq!(entity, EntityKind::Item);
                assert_eq!(id, "dup in collection c2");
            }
            other => panic!("Wrong error variant: {:?}", other),
        }
    }
}
