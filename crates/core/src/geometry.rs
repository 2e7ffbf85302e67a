//! GeoJSON geometry model and the geometry adapter
//!
//! This module provides:
//! - `Geometry`: the GeoJSON-style shapes an item may carry
//! - `bbox_to_polygon`: bounding box → closed 5-vertex ring
//! - `normalize_bbox`: 3-D bounding box → 2-D query box
//! - `point_query_polygon`: the small areal shape used to query by point
//!
//! No reprojection and no antimeridian handling: a box whose `min_x` is
//! greater than its `max_x` is converted verbatim.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single coordinate tuple: `[x, y]` or `[x, y, z]`
pub type Position = Vec<f64>;

/// Side length, in degrees, of the square synthesised around a query point
///
/// The store's intersects primitive needs an areal shape, so point queries
/// are widened to a square of this size centered on the point.
pub const POINT_QUERY_SIZE: f64 = 0.001;

/// GeoJSON geometry
///
/// Serialized in the GeoJSON wire shape: `{"type": "Point", "coordinates": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position
    Point {
        /// `[x, y]` or `[x, y, z]`
        coordinates: Position,
    },
    /// A set of positions
    MultiPoint {
        /// One position per point
        coordinates: Vec<Position>,
    },
    /// A connected path
    LineString {
        /// Path vertices
        coordinates: Vec<Position>,
    },
    /// A set of paths
    MultiLineString {
        /// One vertex list per path
        coordinates: Vec<Vec<Position>>,
    },
    /// An exterior ring followed by optional interior rings
    Polygon {
        /// Closed rings, exterior first
        coordinates: Vec<Vec<Position>>,
    },
    /// A set of polygons
    MultiPolygon {
        /// One ring list per polygon
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    /// A heterogeneous set of geometries
    GeometryCollection {
        /// Member geometries
        geometries: Vec<Geometry>,
    },
}

/// Geometry type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// `Point`
    Point,
    /// `MultiPoint`
    MultiPoint,
    /// `LineString`
    LineString,
    /// `MultiLineString`
    MultiLineString,
    /// `Polygon`
    Polygon,
    /// `MultiPolygon`
    MultiPolygon,
    /// `GeometryCollection`
    GeometryCollection,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        };
        f.write_str(name)
    }
}

impl Geometry {
    /// Classify this geometry
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point { .. } => GeometryKind::Point,
            Geometry::MultiPoint { .. } => GeometryKind::MultiPoint,
            Geometry::LineString { .. } => GeometryKind::LineString,
            Geometry::MultiLineString { .. } => GeometryKind::MultiLineString,
            Geometry::Polygon { .. } => GeometryKind::Polygon,
            Geometry::MultiPolygon { .. } => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection { .. } => GeometryKind::GeometryCollection,
        }
    }

    /// Build a polygon covering the box `(min_x, min_y)..(max_x, max_y)`
    pub fn bbox_polygon(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Geometry::Polygon {
            coordinates: vec![bbox_to_polygon(min_x, min_y, max_x, max_y)],
        }
    }
}

/// Convert a bounding box to a closed polygon ring
///
/// Returns the 5-vertex ring
/// `[(min_x,min_y),(max_x,min_y),(max_x,max_y),(min_x,max_y),(min_x,min_y)]`;
/// first and last vertex are identical.
///
/// # Examples
///
/// ```
/// use geocatalog_core::geometry::bbox_to_polygon;
///
/// let ring = bbox_to_polygon(0.0, 0.0, 10.0, 10.0);
/// assert_eq!(ring.len(), 5);
/// assert_eq!(ring.first(), ring.last());
/// ```
pub fn bbox_to_polygon(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<Position> {
    vec![
        vec![min_x, min_y],
        vec![max_x, min_y],
        vec![max_x, max_y],
        vec![min_x, max_y],
        vec![min_x, min_y],
    ]
}

/// Reduce a bounding box to its 2-D query form
///
/// A 6-element box `[min_x, min_y, min_z, max_x, max_y, max_z]` drops its
/// vertical extent (indices 2 and 5). A 4-element box passes through.
///
/// # Errors
///
/// Returns `InvalidInput` for any other length.
pub fn normalize_bbox(bbox: &[f64]) -> Result<[f64; 4]> {
    match bbox {
        [min_x, min_y, max_x, max_y] => Ok([*min_x, *min_y, *max_x, *max_y]),
        [min_x, min_y, _min_z, max_x, max_y, _max_z] => Ok([*min_x, *min_y, *max_x, *max_y]),
        other => Err(Error::invalid_input(format!(
            "bounding box must have 4 or 6 elements, got {}",
            other.len()
        ))),
    }
}

/// Square polygon of side `POINT_QUERY_SIZE` centered on `(x, y)`
pub fn point_query_polygon(x: f64, y: f64) -> Geometry {
    let half = POINT_QUERY_SIZE / 2.0;
    Geometry::bbox_polygon(x - half, y - half, x + half, y + half)
}
