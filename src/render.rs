use core::fmt;

use crate::point::WGS84Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub u64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feature#{}", self.0)
    }
}

/// Colors are ARGB, `0xAARRGGBB`.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub fill_color: Option<u32>,
    pub stroke_color: u32,
    pub stroke_width: u32,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            fill_color: None,
            stroke_color: 0xFF00_0000,
            stroke_width: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Feature {
    Marker(WGS84Point),
    LineString {
        points: Vec<WGS84Point>,
        style: Style,
    },
    Polygon {
        points: Vec<WGS84Point>,
        style: Style,
    },
}

impl Feature {
    pub fn points(&self) -> &[WGS84Point] {
        match self {
            Feature::Marker(p) => std::slice::from_ref(p),
            Feature::LineString { points, .. } | Feature::Polygon { points, .. } => points,
        }
    }
}

/// Where drawn shapes go. Implemented by whatever displays the map.
pub trait RenderSink {
    fn add_feature(&mut self, feature: Feature) -> FeatureId;
    /// Unknown ids are ignored.
    fn remove_feature(&mut self, id: FeatureId);
    /// Markers have no style and are left alone.
    fn restyle(&mut self, id: FeatureId, style: &Style);
    fn invalidate(&mut self);
}
