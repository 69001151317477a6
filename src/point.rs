use core::fmt;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WGS84Point {
    pub lat: f64,
    pub lon: f64,
}

impl WGS84Point {
    /// Builds a point from degrees. The range is not checked, only that
    /// both components are finite numbers.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(Error::PointAddition { lat, lon });
        }
        Ok(WGS84Point { lat, lon })
    }
}

impl fmt::Display for WGS84Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgs(lat: {:.5}, lon: {:.5})", self.lat, self.lon)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WGS84BoundingBox {
    pub min: WGS84Point,
    pub max: WGS84Point,
}

impl WGS84BoundingBox {
    pub fn from_points(points: &[WGS84Point]) -> Option<Self> {
        let first = points.first()?;
        let (min, max) = points.iter().fold((*first, *first), |(min, max), curr| {
            (
                WGS84Point {
                    lat: min.lat.min(curr.lat),
                    lon: min.lon.min(curr.lon),
                },
                WGS84Point {
                    lat: max.lat.max(curr.lat),
                    lon: max.lon.max(curr.lon),
                },
            )
        });
        Some(WGS84BoundingBox { min, max })
    }
}

impl fmt::Display for WGS84BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgsbbox(min: {}, max: {})", self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for MercatorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mercator(x: {:.5}, y: {:.5})", self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MercatorBoundingBox {
    pub min: MercatorPoint,
    pub max: MercatorPoint,
}

impl MercatorBoundingBox {
    pub fn from_points(points: &[MercatorPoint]) -> Option<Self> {
        let first = points.first()?;
        let (min, max) = points.iter().fold((*first, *first), |(min, max), curr| {
            (
                MercatorPoint {
                    x: min.x.min(curr.x),
                    y: min.y.min(curr.y),
                },
                MercatorPoint {
                    x: max.x.max(curr.x),
                    y: max.y.max(curr.y),
                },
            )
        });
        Some(MercatorBoundingBox { min, max })
    }
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl fmt::Display for MercatorBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mercatorbbox(min: {}, max: {})", self.min, self.max)
    }
}
