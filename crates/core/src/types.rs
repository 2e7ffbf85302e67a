//! Catalog record types
//!
//! - `Item`: a geospatial feature owned by exactly one collection
//! - `Collection`: a named partition with opaque metadata
//! - `Link`: a hypermedia link attached to either
//! - `ItemSubmission`: a create request, single feature or bulk form

use crate::geometry::Geometry;
use crate::identity::make_item_key;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property holding the acquisition timestamp of an item
pub const DATETIME_PROPERTY: &str = "datetime";
/// Property stamped when an item is first stored
pub const CREATED_PROPERTY: &str = "created";
/// Property stamped on every create and update
pub const UPDATED_PROPERTY: &str = "updated";

fn feature_type() -> String {
    "Feature".to_string()
}

// ============================================================================
// Link
// ============================================================================

/// Hypermedia link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Relation type (`self`, `parent`, `collection`, `root`, ...)
    pub rel: String,
    /// Target URL, absolute or relative to the catalog base URL
    pub href: String,
    /// Media type of the target
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    /// Create a link with no media type or title
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            media_type: None,
            title: None,
        }
    }

    /// Builder: set the media type
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

// ============================================================================
// Item
// ============================================================================

/// A geospatial feature
///
/// The pair `(id, collection)` is globally unique; `id` alone is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// GeoJSON object type, always `Feature`
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    /// Catalog spec version the item claims
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stac_version: Option<String>,
    /// Extension schema URLs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stac_extensions: Vec<String>,
    /// Item id, unique within its collection
    pub id: String,
    /// Owning collection id
    pub collection: String,
    /// Footprint
    pub geometry: Geometry,
    /// Axis-aligned bounding box, 2-D (4 values) or 3-D (6 values)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    /// Arbitrary metadata
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Hypermedia links
    #[serde(default)]
    pub links: Vec<Link>,
    /// Asset descriptors
    #[serde(default)]
    pub assets: Map<String, Value>,
}

impl Item {
    /// Create a bare item with empty properties, links and assets
    pub fn new(id: impl Into<String>, collection: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            kind: feature_type(),
            stac_version: None,
            stac_extensions: Vec::new(),
            id: id.into(),
            collection: collection.into(),
            geometry,
            bbox: None,
            properties: Map::new(),
            links: Vec::new(),
            assets: Map::new(),
        }
    }

    /// Composite store key of this item
    pub fn storage_key(&self) -> String {
        make_item_key(&self.id, &self.collection)
    }

    /// `properties.datetime`, if present and a string
    pub fn datetime(&self) -> Option<&str> {
        self.properties.get(DATETIME_PROPERTY).and_then(Value::as_str)
    }

    /// Set a string property, replacing any previous value
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) {
        self.properties
            .insert(name.to_string(), Value::String(value.into()));
    }
}

// ============================================================================
// Collection
// ============================================================================

/// A named logical partition of items
///
/// Everything other than `id` and `links` is carried as opaque metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique collection id
    pub id: String,
    /// Hypermedia links
    #[serde(default)]
    pub links: Vec<Link>,
    /// Opaque catalog metadata (title, extent, license, ...)
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Collection {
    /// Create a collection with no metadata
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            links: Vec::new(),
            metadata: Map::new(),
        }
    }
}

// ============================================================================
// ItemSubmission
// ============================================================================

/// Payload of an item create request
#[derive(Debug, Clone, PartialEq)]
pub enum ItemSubmission {
    /// A single feature
    Feature(Item),
    /// A collection-of-features submission, inserted in bulk
    FeatureCollection(Vec<Item>),
}

impl From<Item> for ItemSubmission {
    fn from(item: Item) -> Self {
        ItemSubmission::Feature(item)
    }
}
