use core::fmt;

use crate::geodesy::haversine_distance;
use crate::point::WGS84Point;

#[derive(Clone, Debug, PartialEq)]
pub struct Triangle(pub WGS84Point, pub WGS84Point, pub WGS84Point);

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{} B:{} C:{}", self.0, self.1, self.2)
    }
}

impl Triangle {
    /// Haversine lengths of the sides A-B, A-C and B-C.
    pub fn sides(&self) -> (f64, f64, f64) {
        (
            haversine_distance(&self.0, &self.1),
            haversine_distance(&self.0, &self.2),
            haversine_distance(&self.1, &self.2),
        )
    }

    /// Heron's formula over the geodesic side lengths. The triangle is
    /// treated as planar.
    pub fn area(&self) -> f64 {
        let (d1, d2, d3) = self.sides();
        let s = (d1 + d2 + d3) / 2.0;
        let radicand = s * (s - d1) * (s - d2) * (s - d3);
        // rounding can push the radicand of a flat triangle below zero
        if radicand < 0.0 {
            0.0
        } else {
            radicand.sqrt()
        }
    }
}

/// Fan of triangles sharing `apex`, one per consecutive pair of `ring`,
/// including the pair that closes the ring.
pub fn fan(apex: &WGS84Point, ring: &[WGS84Point]) -> Vec<Triangle> {
    let n = ring.len();
    (0..n)
        .map(|i| Triangle(*apex, ring[i], ring[(i + 1) % n]))
        .collect()
}
