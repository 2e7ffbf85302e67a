//! Search filter set, sort specification, page tokens and result pages
//!
//! - SearchRequest: immutable per-request filter set
//! - SortBy: parsed `+field` / `-field` specification
//! - PageToken: opaque resume cursor over the store's key order
//! - SearchPage: items, matched count and continuation of one search

use crate::datetime::{parse_date_interval, DatetimeFilter};
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::types::Item;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Page size used when a request does not name one
pub const DEFAULT_LIMIT: usize = 10;
/// Largest page size a request may ask for
pub const MAX_LIMIT: usize = 10_000;

// ============================================================================
// Sort
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first
    Asc,
    /// Largest first
    Desc,
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBy {
    /// Field path, e.g. `properties.datetime`
    pub field: String,
    /// Requested direction
    pub direction: SortDirection,
}

/// Parse sort specifications
///
/// `+field` sorts ascending, `-field` descending; a bare `field` is
/// ascending. Empty entries are ignored.
pub fn parse_sortby<S: AsRef<str>>(specs: &[S]) -> Vec<SortBy> {
    specs
        .iter()
        .filter_map(|spec| {
            let spec = spec.as_ref().trim();
            let (direction, field) = match spec.chars().next()? {
                '+' => (SortDirection::Asc, &spec[1..]),
                '-' => (SortDirection::Desc, &spec[1..]),
                _ => (SortDirection::Asc, spec),
            };
            if field.is_empty() {
                return None;
            }
            Some(SortBy {
                field: field.to_string(),
                direction,
            })
        })
        .collect()
}

// ============================================================================
// PageToken
// ============================================================================

/// Resume cursor: "continue after this record"
///
/// Wraps the store key of the last record of the previous page. The
/// encoded form is URL-safe base64 and opaque to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageToken(String);

impl PageToken {
    /// Cursor resuming after `key`
    pub fn after(key: impl Into<String>) -> Self {
        PageToken(key.into())
    }

    /// Store key the next page starts after
    pub fn key(&self) -> &str {
        &self.0
    }

    /// Opaque text form handed to clients
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.as_bytes())
    }

    /// Decode a token previously produced by [`PageToken::encode`]
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the text is not a token.
    pub fn decode(text: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(text.as_bytes())
            .map_err(|e| Error::invalid_input(format!("malformed page token: {}", e)))?;
        let key = String::from_utf8(bytes)
            .map_err(|_| Error::invalid_input("malformed page token: not UTF-8"))?;
        if key.is_empty() {
            return Err(Error::invalid_input("malformed page token: empty"));
        }
        Ok(PageToken(key))
    }
}

// ============================================================================
// SearchRequest
// ============================================================================

/// Filter set of one search request
///
/// Built once with the `with_*` builders, then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    /// Restrict to these collections
    pub collections: Option<Vec<String>>,
    /// Restrict to these item ids
    pub ids: Option<Vec<String>>,
    /// Restrict `properties.datetime`
    pub datetime: Option<DatetimeFilter>,
    /// Items intersecting this box (4 or 6 values)
    pub bbox: Option<Vec<f64>>,
    /// Items intersecting this geometry
    pub intersects: Option<Geometry>,
    /// Requested page size
    pub limit: Option<usize>,
    /// Resume cursor from a previous page
    pub token: Option<PageToken>,
    /// Parsed sort keys
    pub sortby: Vec<SortBy>,
}

impl SearchRequest {
    /// Empty filter set: every item, default page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: restrict to collections
    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = Some(collections.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: restrict to item ids
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: restrict by datetime interval text
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the interval does not parse.
    pub fn with_datetime(mut self, interval: &str) -> Result<Self> {
        self.datetime = Some(parse_date_interval(interval)?);
        Ok(self)
    }

    /// Builder: restrict by bounding box
    pub fn with_bbox(mut self, bbox: Vec<f64>) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Builder: restrict by intersection with a geometry
    pub fn with_intersects(mut self, geometry: Geometry) -> Self {
        self.intersects = Some(geometry);
        self
    }

    /// Builder: page size
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Builder: resume cursor
    pub fn with_token(mut self, token: PageToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Builder: sort specification text (`+field`, `-field`)
    pub fn with_sortby<S: AsRef<str>>(mut self, specs: &[S]) -> Self {
        self.sortby = parse_sortby(specs);
        self
    }

    /// Page size clamped into `1..=max_limit`
    pub fn effective_limit(&self, default_limit: usize, max_limit: usize) -> usize {
        let max_limit = max_limit.max(1);
        self.limit.unwrap_or(default_limit).clamp(1, max_limit)
    }
}

// ============================================================================
// SearchPage
// ============================================================================

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    /// Items of this page, in store key order
    pub items: Vec<Item>,
    /// Total records satisfying the filters, independent of page size
    pub matched: Option<usize>,
    /// Cursor for the next page, present only if more records remain
    pub next_token: Option<PageToken>,
}

impl SearchPage {
    /// Page with no items and a matched count of zero
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            matched: Some(0),
            next_token: None,
        }
    }

    /// Number of items returned on this page
    pub fn returned(&self) -> usize {
        self.items.len()
    }
}
