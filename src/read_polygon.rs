use crate::error::{Error, Result};
use crate::point::WGS84Point;
use crate::store::Mode;

/// A line or polygon read from a file.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub mode: Mode,
    pub wgs: Vec<WGS84Point>,
}

impl Shape {
    fn line<I: IntoIterator<Item = (f64, f64)>>(lonlat: I) -> Self {
        Shape {
            mode: Mode::Line,
            wgs: to_wgs(lonlat),
        }
    }

    /// The closing vertex of the ring is dropped, the session closes
    /// polygons itself.
    fn polygon<I: IntoIterator<Item = (f64, f64)>>(lonlat: I) -> Self {
        let mut wgs = to_wgs(lonlat);
        if wgs.len() > 1 && wgs.first() == wgs.last() {
            wgs.pop();
        }
        Shape {
            mode: Mode::Polygon,
            wgs,
        }
    }
}

fn to_wgs<I: IntoIterator<Item = (f64, f64)>>(lonlat: I) -> Vec<WGS84Point> {
    lonlat
        .into_iter()
        .map(|(lon, lat)| WGS84Point { lat, lon })
        .collect()
}

mod lockml {
    use super::*;
    use kml::Kml;
    use kml::types::Geometry;

    fn collect(kml: &Kml, shapes: &mut Vec<Shape>) {
        match kml {
            Kml::KmlDocument(doc) => doc.elements.iter().for_each(|e| collect(e, shapes)),
            Kml::Document { elements, .. } => elements.iter().for_each(|e| collect(e, shapes)),
            Kml::Folder(z) => z.elements.iter().for_each(|e| collect(e, shapes)),
            Kml::Placemark(p) => {
                if let Some(g) = &p.geometry {
                    geometry(g, shapes);
                }
            }
            _ => {}
        }
    }

    fn geometry(g: &Geometry, shapes: &mut Vec<Shape>) {
        match g {
            Geometry::Polygon(p) => {
                shapes.push(Shape::polygon(p.outer.coords.iter().map(|c| (c.x, c.y))));
            }
            Geometry::LineString(l) => {
                shapes.push(Shape::line(l.coords.iter().map(|c| (c.x, c.y))));
            }
            Geometry::MultiGeometry(m) => m.geometries.iter().for_each(|g| geometry(g, shapes)),
            _ => {}
        }
    }

    pub fn read(content: &str) -> Result<Vec<Shape>> {
        let kml: Kml = content
            .parse()
            .map_err(|e: kml::Error| Error::Parse(e.to_string()))?;
        let mut shapes = Vec::new();
        collect(&kml, &mut shapes);
        Ok(shapes)
    }
}

mod locgpx {
    use super::*;
    use gpx::Gpx;
    use std::io::Cursor;

    pub fn read(content: &str) -> Result<Vec<Shape>> {
        let gpx: Gpx =
            gpx::read(Cursor::new(content)).map_err(|e| Error::Parse(e.to_string()))?;

        let tracks = gpx.tracks.iter().flat_map(|track| {
            track.segments.iter().map(|segment| {
                Shape::line(segment.points.iter().map(|w| (w.point().x(), w.point().y())))
            })
        });
        let routes = gpx
            .routes
            .iter()
            .map(|route| Shape::line(route.points.iter().map(|w| (w.point().x(), w.point().y()))));
        Ok(tracks.chain(routes).collect())
    }
}

mod locjson {
    use super::*;
    use geojson::{GeoJson, Geometry, Value};

    pub fn read(content: &str) -> Result<Vec<Shape>> {
        let geojson: GeoJson = content
            .parse()
            .map_err(|e: geojson::Error| Error::Parse(e.to_string()))?;

        let mut shapes = Vec::new();
        match geojson {
            GeoJson::FeatureCollection(collection) => {
                for feature in &collection.features {
                    if let Some(geometry) = &feature.geometry {
                        geometry_to_shapes(geometry, &mut shapes);
                    }
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = &feature.geometry {
                    geometry_to_shapes(geometry, &mut shapes);
                }
            }
            GeoJson::Geometry(geometry) => geometry_to_shapes(&geometry, &mut shapes),
        }
        Ok(shapes)
    }

    fn lonlat(positions: &[Vec<f64>]) -> impl Iterator<Item = (f64, f64)> + '_ {
        positions
            .iter()
            .filter(|p| p.len() >= 2)
            .map(|p| (p[0], p[1]))
    }

    fn geometry_to_shapes(geometry: &Geometry, shapes: &mut Vec<Shape>) {
        match &geometry.value {
            Value::Polygon(rings) => {
                if let Some(exterior) = rings.first() {
                    shapes.push(Shape::polygon(lonlat(exterior)));
                }
            }
            Value::MultiPolygon(polygons) => {
                for rings in polygons {
                    if let Some(exterior) = rings.first() {
                        shapes.push(Shape::polygon(lonlat(exterior)));
                    }
                }
            }
            Value::LineString(line) => shapes.push(Shape::line(lonlat(line))),
            Value::MultiLineString(lines) => {
                for line in lines {
                    shapes.push(Shape::line(lonlat(line)));
                }
            }
            Value::GeometryCollection(geometries) => {
                for g in geometries {
                    geometry_to_shapes(g, shapes);
                }
            }
            _ => {}
        }
    }
}

/// Reads the lines and polygons of a kml, gpx or geojson file.
pub fn read_shapes(filename: &str) -> Result<Vec<Shape>> {
    let content = std::fs::read_to_string(filename)?;
    let shapes = parse_shapes(filename, &content)?;
    log::info!("read: {}: {} shapes", filename, shapes.len());
    Ok(shapes)
}

/// Picks the format from the extension of `filename`.
pub fn parse_shapes(filename: &str, content: &str) -> Result<Vec<Shape>> {
    if filename.ends_with("kml") {
        lockml::read(content)
    } else if filename.ends_with("gpx") {
        locgpx::read(content)
    } else if filename.ends_with("json") {
        locjson::read(content)
    } else {
        Err(Error::Parse(format!("unsupported file type: {}", filename)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>field</name>
      <Polygon>
        <outerBoundaryIs>
          <LinearRing>
            <coordinates>0,0,0 1,0,0 1,1,0 0,1,0 0,0,0</coordinates>
          </LinearRing>
        </outerBoundaryIs>
      </Polygon>
    </Placemark>
    <Placemark>
      <name>path</name>
      <LineString>
        <coordinates>-46.6,-23.5,0 -43.2,-22.9,0</coordinates>
      </LineString>
    </Placemark>
  </Document>
</kml>"#;

    const GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <trkseg>
      <trkpt lat="-23.5" lon="-46.6"></trkpt>
      <trkpt lat="-22.9" lon="-43.2"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    const GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {},
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
      }
    },
    {
      "type": "Feature",
      "properties": {},
      "geometry": {
        "type": "LineString",
        "coordinates": [[-46.6, -23.5], [-43.2, -22.9]]
      }
    }
  ]
}"#;

    fn square() -> Shape {
        Shape {
            mode: Mode::Polygon,
            wgs: vec![
                WGS84Point { lat: 0.0, lon: 0.0 },
                WGS84Point { lat: 0.0, lon: 1.0 },
                WGS84Point { lat: 1.0, lon: 1.0 },
                WGS84Point { lat: 1.0, lon: 0.0 },
            ],
        }
    }

    fn line() -> Shape {
        Shape {
            mode: Mode::Line,
            wgs: vec![
                WGS84Point {
                    lat: -23.5,
                    lon: -46.6,
                },
                WGS84Point {
                    lat: -22.9,
                    lon: -43.2,
                },
            ],
        }
    }

    #[test]
    fn test_kml() {
        let shapes = parse_shapes("a.kml", KML).unwrap();
        assert_eq!(shapes, vec![square(), line()]);
    }

    #[test]
    fn test_gpx() {
        let shapes = parse_shapes("a.gpx", GPX).unwrap();
        assert_eq!(shapes, vec![line()]);
    }

    #[test]
    fn test_geojson() {
        let shapes = parse_shapes("a.geojson", GEOJSON).unwrap();
        assert_eq!(shapes, vec![square(), line()]);
    }

    #[test]
    fn test_unsupported() {
        assert!(matches!(
            parse_shapes("a.shp", ""),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            parse_shapes("a.geojson", "not json"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_shapes("/nonexistent/shape.kml"),
            Err(Error::Io(_))
        ));
    }
}
