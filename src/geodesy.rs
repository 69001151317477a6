use crate::error::{Error, Result};
use crate::point::WGS84Point;

/// Mean earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Great-circle distance in meters on a sphere of radius [`EARTH_RADIUS`].
///
/// Inputs are not range checked: out-of-range degrees go straight through
/// the trigonometry.
pub fn haversine_distance(a: &WGS84Point, b: &WGS84Point) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push h past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS * c
}

pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_distance(
        &WGS84Point {
            lat: lat1,
            lon: lon1,
        },
        &WGS84Point {
            lat: lat2,
            lon: lon2,
        },
    )
}

/// Planar mean of the latitudes and longitudes.
pub fn centroid(points: &[WGS84Point]) -> Result<WGS84Point> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }
    let (lat, lon) = points
        .iter()
        .fold((0f64, 0f64), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    let n = points.len() as f64;
    Ok(WGS84Point {
        lat: lat / n,
        lon: lon / n,
    })
}

/// Sorts the points by `atan2(lat - center.lat, lon - center.lon)`, i.e.
/// longitude is x and latitude is y in a flat plane. Equal angles keep
/// their input order.
pub fn angular_order(points: &[WGS84Point], center: &WGS84Point) -> Vec<WGS84Point> {
    let mut keyed: Vec<(f64, WGS84Point)> = points
        .iter()
        .map(|p| ((p.lat - center.lat).atan2(p.lon - center.lon), *p))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Angular order around the centroid of the points themselves.
pub fn ordered(points: &[WGS84Point]) -> Result<Vec<WGS84Point>> {
    let center = centroid(points)?;
    Ok(angular_order(points, &center))
}

/// Sum of the haversine distances between consecutive points, in the given
/// order.
pub fn path_length(points: &[WGS84Point]) -> Result<f64> {
    let total: f64 = points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum();
    if !total.is_finite() {
        return Err(Error::NonFinite("line distance"));
    }
    Ok(total)
}
