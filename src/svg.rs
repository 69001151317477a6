use std::collections::BTreeMap;

use crate::{
    error::Result,
    mercator::WebMercatorProjection,
    point::{MercatorBoundingBox, MercatorPoint},
    render::{Feature, FeatureId, RenderSink, Style},
};

const SIZE: f64 = 500.0;

/// Renders features into a 500x500 SVG document in Web Mercator.
pub struct SvgSink {
    projection: WebMercatorProjection,
    padding: f64,
    features: BTreeMap<FeatureId, Feature>,
    next_id: u64,
    document: String,
}

struct Frame {
    bbox: MercatorBoundingBox,
    padding: f64,
}

impl Frame {
    fn width(&self) -> f64 {
        self.bbox.width()
    }
    fn height(&self) -> f64 {
        self.bbox.height()
    }
    fn scale(&self) -> f64 {
        let padded_width = self.width() * (1.0 + 2.0 * self.padding);
        let padded_height = self.height() * (1.0 + 2.0 * self.padding);
        SIZE / padded_width.max(padded_height)
    }
    fn transform(&self, p: &MercatorPoint) -> (f64, f64) {
        if self.width() == 0.0 && self.height() == 0.0 {
            return (SIZE / 2.0, SIZE / 2.0);
        }
        let scale = self.scale();
        let svg_x = (p.x - self.bbox.min.x + self.width() * self.padding) * scale;
        let svg_y = SIZE - (p.y - self.bbox.min.y + self.height() * self.padding) * scale;
        (svg_x, svg_y)
    }
    fn points(&self, points: &[MercatorPoint]) -> String {
        points
            .iter()
            .map(|p| {
                let (x, y) = self.transform(p);
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl SvgSink {
    pub fn new() -> Result<Self> {
        Ok(Self {
            projection: WebMercatorProjection::make()?,
            padding: 0.1,
            features: BTreeMap::new(),
            next_id: 0,
            document: String::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The document as of the last `invalidate`.
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn render(&self) -> Result<String> {
        let mut projected = Vec::with_capacity(self.features.len());
        for feature in self.features.values() {
            projected.push((feature, self.projection.project_all(feature.points())?));
        }
        let all: Vec<MercatorPoint> = projected
            .iter()
            .flat_map(|(_, m)| m.iter().copied())
            .collect();

        let mut svg = String::from(
            r#"<svg width="500" height="500" xmlns="http://www.w3.org/2000/svg">"#,
        );
        svg.push('\n');
        if let Some(bbox) = MercatorBoundingBox::from_points(&all) {
            let frame = Frame {
                bbox,
                padding: self.padding,
            };
            for (feature, mercator) in &projected {
                svg.push_str(&element(&frame, feature, mercator));
                svg.push('\n');
            }
        }
        svg.push_str("</svg>");
        Ok(svg)
    }
}

fn element(frame: &Frame, feature: &Feature, mercator: &[MercatorPoint]) -> String {
    match feature {
        Feature::Marker(_) => {
            let (x, y) = frame.transform(&mercator[0]);
            format!(
                r#"  <circle cx="{:.2}" cy="{:.2}" r="4" fill="red" stroke="black" stroke-width="1"/>"#,
                x, y
            )
        }
        Feature::LineString { style, .. } => format!(
            r#"  <polyline points="{}" fill="none" {}/>"#,
            frame.points(mercator),
            stroke(style)
        ),
        Feature::Polygon { style, .. } => format!(
            r#"  <polygon points="{}" {} {}/>"#,
            frame.points(mercator),
            fill(style),
            stroke(style)
        ),
    }
}

fn css_color(argb: u32) -> (String, f64) {
    let alpha = ((argb >> 24) & 0xFF) as f64 / 255.0;
    (format!("#{:06x}", argb & 0x00FF_FFFF), alpha)
}

fn fill(style: &Style) -> String {
    match style.fill_color {
        Some(c) => {
            let (color, opacity) = css_color(c);
            format!(r#"fill="{}" fill-opacity="{:.2}""#, color, opacity)
        }
        None => r#"fill="none""#.to_string(),
    }
}

fn stroke(style: &Style) -> String {
    let (color, opacity) = css_color(style.stroke_color);
    format!(
        r#"stroke="{}" stroke-opacity="{:.2}" stroke-width="{}""#,
        color, opacity, style.stroke_width
    )
}

impl RenderSink for SvgSink {
    fn add_feature(&mut self, feature: Feature) -> FeatureId {
        let id = FeatureId(self.next_id);
        self.next_id += 1;
        log::trace!("svg: add {}", id);
        self.features.insert(id, feature);
        id
    }

    fn remove_feature(&mut self, id: FeatureId) {
        if self.features.remove(&id).is_none() {
            log::debug!("svg: {} not found", id);
        }
    }

    fn restyle(&mut self, id: FeatureId, new_style: &Style) {
        match self.features.get_mut(&id) {
            Some(Feature::LineString { style, .. }) | Some(Feature::Polygon { style, .. }) => {
                *style = new_style.clone();
            }
            Some(Feature::Marker(_)) | None => {}
        }
    }

    fn invalidate(&mut self) {
        match self.render() {
            Ok(document) => self.document = document,
            Err(e) => log::error!("svg: {}", e),
        }
    }
}
