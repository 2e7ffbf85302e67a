//! GeoJSON → `geo-types` conversion for intersection tests

use geo::Intersects;
use geo_types::{Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use geocatalog_core::geometry::Position;
use geocatalog_core::Geometry;

use crate::store::{StoreError, StoreResult};

/// A geometry prepared for repeated intersection tests
pub type Shape = geo_types::Geometry<f64>;

/// Convert a catalog geometry into a `geo-types` geometry
///
/// Z values are ignored.
///
/// # Errors
///
/// Returns `Payload` if a position has fewer than two ordinates.
pub fn to_shape(geometry: &Geometry) -> StoreResult<Shape> {
    Ok(match geometry {
        Geometry::Point { coordinates } => {
            let c = coord(coordinates)?;
            Shape::Point(Point::new(c.x, c.y))
        }
        Geometry::MultiPoint { coordinates } => Shape::MultiPoint(MultiPoint(
            coordinates
                .iter()
                .map(|p| coord(p).map(Point::from))
                .collect::<StoreResult<_>>()?,
        )),
        Geometry::LineString { coordinates } => Shape::LineString(line(coordinates)?),
        Geometry::MultiLineString { coordinates } => Shape::MultiLineString(MultiLineString(
            coordinates.iter().map(|l| line(l)).collect::<StoreResult<_>>()?,
        )),
        Geometry::Polygon { coordinates } => Shape::Polygon(polygon(coordinates)?),
        Geometry::MultiPolygon { coordinates } => Shape::MultiPolygon(MultiPolygon(
            coordinates
                .iter()
                .map(|p| polygon(p))
                .collect::<StoreResult<_>>()?,
        )),
        Geometry::GeometryCollection { geometries } => {
            Shape::GeometryCollection(geo_types::GeometryCollection(
                geometries.iter().map(to_shape).collect::<StoreResult<_>>()?,
            ))
        }
    })
}

/// Exact geometric intersection test
pub fn shapes_intersect(a: &Shape, b: &Shape) -> bool {
    a.intersects(b)
}

fn coord(position: &Position) -> StoreResult<Coord<f64>> {
    match position.as_slice() {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        other => Err(StoreError::Payload(format!(
            "position needs at least 2 ordinates, got {}",
            other.len()
        ))),
    }
}

fn line(positions: &[Position]) -> StoreResult<LineString<f64>> {
    Ok(LineString(
        positions.iter().map(coord).collect::<StoreResult<_>>()?,
    ))
}

fn polygon(rings: &[Vec<Position>]) -> StoreResult<Polygon<f64>> {
    let mut rings = rings.iter();
    let exterior = match rings.next() {
        Some(ring) => line(ring)?,
        None => LineString(Vec::new()),
    };
    let interiors = rings.map(|r| line(r)).collect::<StoreResult<_>>()?;
    Ok(Polygon::new(exterior, interiors))
}
