use core::fmt;

use crate::point::WGS84Point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Unset,
    Line,
    Polygon,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Unset => "unset",
            Mode::Line => "line",
            Mode::Polygon => "polygon",
        };
        write!(f, "{}", s)
    }
}

/// Points collected by one session. Line and polygon points live in
/// separate sequences; only the one selected by `mode` is read by queries.
#[derive(Clone, Debug, Default)]
pub struct PointStore {
    line: Vec<WGS84Point>,
    polygon: Vec<WGS84Point>,
    mode: Mode,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Only one mode is active at a time. Points of the other mode are kept.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Appends to the sequence of the active mode. Returns false when no
    /// mode is set.
    pub fn push(&mut self, point: WGS84Point) -> bool {
        match self.mode {
            Mode::Unset => false,
            Mode::Line => {
                self.line.push(point);
                true
            }
            Mode::Polygon => {
                self.polygon.push(point);
                true
            }
        }
    }

    /// The sequence of the active mode, in insertion order.
    pub fn active(&self) -> &[WGS84Point] {
        match self.mode {
            Mode::Unset => &[],
            Mode::Line => &self.line,
            Mode::Polygon => &self.polygon,
        }
    }

    pub fn line(&self) -> &[WGS84Point] {
        &self.line
    }

    pub fn polygon(&self) -> &[WGS84Point] {
        &self.polygon
    }

    pub fn clear_inactive(&mut self) {
        match self.mode {
            Mode::Unset => {
                self.line.clear();
                self.polygon.clear();
            }
            Mode::Line => self.polygon.clear(),
            Mode::Polygon => self.line.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.line.clear();
        self.polygon.clear();
        self.mode = Mode::Unset;
    }
}
