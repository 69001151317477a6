use geo::algorithm::geodesic_area::GeodesicArea;
use geo::orient::Direction;
use geo::{Coord, Orient, Polygon};

use crate::point::WGS84Point;

/// Area of the ring on the WGS84 ellipsoid, in square meters. The ring is
/// taken in the given order and closed implicitly.
pub fn geodesic_area(ring: &[WGS84Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let coords: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p.lon, y: p.lat }).collect();

    // exterior ring, no holes
    let mut geo_polygon = Polygon::new(coords.into(), vec![]);
    geo_polygon = geo_polygon.orient(Direction::Default);

    geo_polygon.geodesic_area_unsigned()
}
