use proj4rs::proj::Proj;

use crate::error::{Error, Result};
use crate::point::{MercatorPoint, WGS84Point};

pub struct WebMercatorProjection {
    wgs84_spec: Proj,
    dst_spec: Proj,
}

impl WebMercatorProjection {
    pub fn make() -> Result<WebMercatorProjection> {
        // EPSG:3857
        // https://gis.stackexchange.com/questions/159572/proj4-for-epsg3857
        let spec = "+proj=merc +lon_0=0 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs";
        let dst_spec = Proj::from_proj_string(spec).map_err(projection_error)?;

        let spec = "+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs";
        let wgs84_spec = Proj::from_proj_string(spec).map_err(projection_error)?;
        Ok(WebMercatorProjection {
            wgs84_spec,
            dst_spec,
        })
    }

    pub fn project(&self, wgs: &WGS84Point) -> Result<MercatorPoint> {
        let mut p = (wgs.lon.to_radians(), wgs.lat.to_radians());
        proj4rs::transform::transform(&self.wgs84_spec, &self.dst_spec, &mut p)
            .map_err(projection_error)?;
        if !p.0.is_finite() || !p.1.is_finite() {
            log::warn!("mercator: cannot project {}", wgs);
            return Err(Error::Projection(format!("{} has no mercator image", wgs)));
        }
        Ok(MercatorPoint { x: p.0, y: p.1 })
    }

    pub fn project_all(&self, wgs: &[WGS84Point]) -> Result<Vec<MercatorPoint>> {
        wgs.iter().map(|w| self.project(w)).collect()
    }
}

fn projection_error(e: proj4rs::errors::Error) -> Error {
    Error::Projection(format!("{:?}", e))
}
