use crate::{
    error::{Error, Result},
    geodesy,
    point::{WGS84BoundingBox, WGS84Point},
    reference, triangulation,
};

pub struct Polygon {
    pub wgs: Vec<WGS84Point>,
}

impl Polygon {
    pub fn info(&self) {
        log::info!("polygon: len: {}", self.wgs.len());
        if let Some(bbox) = self.wgsbbox() {
            log::info!("polygon: wgs bbox: {}", bbox);
        }
        match self.estimated_area() {
            Ok(area) => log::info!("polygon: area: {:.1}", area),
            Err(e) => log::info!("polygon: area: {}", e),
        }
        if let Ok(area) = self.geodesic_area() {
            log::info!("polygon: geodesic area: {:.1} (geo crate)", area);
        }
    }

    pub fn wgsbbox(&self) -> Option<WGS84BoundingBox> {
        WGS84BoundingBox::from_points(&self.wgs)
    }

    pub fn ordered(&self) -> Result<Vec<WGS84Point>> {
        geodesy::ordered(&self.wgs)
    }

    pub fn estimated_area(&self) -> Result<f64> {
        estimate_area(&self.wgs)
    }

    /// Ellipsoidal area from the geo crate, for comparison.
    pub fn geodesic_area(&self) -> Result<f64> {
        Ok(reference::geodesic_area(&self.ordered()?))
    }
}

/// Approximate area in square meters: the points are put in angular order
/// around their centroid, fanned into triangles from the centroid and the
/// triangle areas are summed.
///
/// This is not a spherical excess computation. Large or strongly non-convex
/// shapes are over- or under-estimated.
pub fn estimate_area(points: &[WGS84Point]) -> Result<f64> {
    if points.len() < 3 {
        return Ok(0.0);
    }
    let center = geodesy::centroid(points)?;
    let ring = geodesy::angular_order(points, &center);
    let total: f64 = triangulation::fan(&center, &ring)
        .iter()
        .map(|t| t.area())
        .sum();
    if !total.is_finite() {
        return Err(Error::NonFinite("area"));
    }
    log::trace!("polygon: {} triangles, area {:.1}", ring.len(), total);
    Ok(total)
}
