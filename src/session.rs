use crate::{
    error::{Error, Result},
    geodesy,
    point::WGS84Point,
    polygon::{self, Polygon},
    render::{Feature, FeatureId, RenderSink, Style},
    store::{Mode, PointStore},
};

/// What `Session::area` does with line points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineArea {
    /// The line is closed and measured like a polygon.
    #[default]
    ClosedFan,
    /// Reported as `Error::InvalidMode`, the area is 0.
    Disallowed,
}

/// What happens to the points of the other mode on `Session::set_mode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeSwitch {
    #[default]
    KeepPoints,
    ClearInactive,
}

#[derive(Clone, Debug, Default)]
pub struct Options {
    pub line_area: LineArea,
    pub mode_switch: ModeSwitch,
}

/// Receives the errors a session recovers from.
pub trait ErrorReporter {
    fn report(&mut self, error: &Error);
}

pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&mut self, error: &Error) {
        log::error!("session: {}", error);
    }
}

impl<F: FnMut(&Error)> ErrorReporter for F {
    fn report(&mut self, error: &Error) {
        self(error)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Marker,
    Line,
    Polygon,
}

/// One line or polygon being drawn. Errors never leave the session in a
/// broken state; they go to the reporter and queries fall back to 0 or an
/// empty list.
pub struct Session {
    store: PointStore,
    options: Options,
    reporter: Box<dyn ErrorReporter>,
    line_style: Style,
    polygon_style: Style,
    drawn: Vec<(FeatureId, Kind)>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Session {
    pub fn new(options: Options) -> Self {
        Session {
            store: PointStore::new(),
            options,
            reporter: Box::new(LogReporter),
            line_style: Style::default(),
            polygon_style: Style::default(),
            drawn: Vec::new(),
        }
    }

    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn mode(&self) -> Mode {
        self.store.mode()
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    fn report(&mut self, error: Error) -> Error {
        self.reporter.report(&error);
        error
    }

    pub fn set_mode(&mut self, mode: Mode) {
        log::debug!("session: mode {} -> {}", self.store.mode(), mode);
        self.store.set_mode(mode);
        if self.options.mode_switch == ModeSwitch::ClearInactive {
            self.store.clear_inactive();
        }
    }

    /// Does nothing when no mode is set.
    pub fn add_point(&mut self, lat: f64, lon: f64) -> Result<()> {
        let point = WGS84Point::new(lat, lon).map_err(|e| self.report(e))?;
        if !self.store.push(point) {
            log::debug!("session: no mode, {} ignored", point);
        }
        Ok(())
    }

    /// Points of the active mode in angular order around their centroid.
    pub fn ordered_points(&mut self) -> Vec<WGS84Point> {
        let points = self.store.active();
        if points.is_empty() {
            return Vec::new();
        }
        match geodesy::ordered(points) {
            Ok(ordered) => ordered,
            Err(e) => {
                self.report(e);
                Vec::new()
            }
        }
    }

    pub fn area(&mut self) -> f64 {
        let n = self.store.active().len();
        match self.store.mode() {
            Mode::Unset => {
                log::debug!("session: {}", Error::InvalidMode(Mode::Unset));
                return 0.0;
            }
            Mode::Polygon if n < 3 => return 0.0,
            Mode::Line if n < 2 => return 0.0,
            Mode::Line if self.options.line_area == LineArea::Disallowed => {
                self.report(Error::InvalidMode(Mode::Line));
                return 0.0;
            }
            Mode::Line | Mode::Polygon => {}
        }
        match polygon::estimate_area(self.store.active()) {
            Ok(area) => area,
            Err(e) => {
                self.report(e);
                0.0
            }
        }
    }

    /// Length of the line in the order the points were added.
    pub fn total_line_distance(&mut self) -> f64 {
        if self.store.mode() != Mode::Line {
            return 0.0;
        }
        let points = self.store.line();
        if points.len() < 2 {
            return 0.0;
        }
        match geodesy::path_length(points) {
            Ok(distance) => distance,
            Err(e) => {
                self.report(e);
                0.0
            }
        }
    }

    pub fn reset(&mut self) {
        log::debug!("session: reset");
        self.store.clear();
    }

    pub fn info(&self) {
        log::info!("session: mode: {}", self.store.mode());
        log::info!("session: line points: {}", self.store.line().len());
        log::info!("session: polygon points: {}", self.store.polygon().len());
        if self.store.mode() == Mode::Polygon {
            Polygon {
                wgs: self.store.polygon().to_vec(),
            }
            .info();
        }
    }

    /// One marker per point of the active mode, in angular order.
    pub fn draw_markers(&mut self, sink: &mut dyn RenderSink) -> Vec<FeatureId> {
        let ids: Vec<FeatureId> = self
            .ordered_points()
            .into_iter()
            .map(|p| sink.add_feature(Feature::Marker(p)))
            .collect();
        self.drawn.extend(ids.iter().map(|id| (*id, Kind::Marker)));
        ids
    }

    /// Draws the line points in the order they were added.
    pub fn draw_line_string(&mut self, sink: &mut dyn RenderSink) -> Result<FeatureId> {
        let points = self.store.line();
        if points.len() < 2 {
            let e = Error::NotEnoughPoints {
                needed: 2,
                found: points.len(),
            };
            return Err(self.report(e));
        }
        let id = sink.add_feature(Feature::LineString {
            points: points.to_vec(),
            style: self.line_style.clone(),
        });
        self.drawn.push((id, Kind::Line));
        Ok(id)
    }

    pub fn draw_polygon(&mut self, sink: &mut dyn RenderSink) -> Result<FeatureId> {
        let points = self.store.polygon();
        if points.len() < 3 {
            let e = Error::NotEnoughPoints {
                needed: 3,
                found: points.len(),
            };
            return Err(self.report(e));
        }
        let ordered = geodesy::ordered(points).map_err(|e| self.report(e))?;
        let id = sink.add_feature(Feature::Polygon {
            points: ordered,
            style: self.polygon_style.clone(),
        });
        self.drawn.push((id, Kind::Polygon));
        Ok(id)
    }

    pub fn set_line_style(&mut self, sink: &mut dyn RenderSink, style: Style) {
        self.restyle(sink, Kind::Line, &style);
        self.line_style = style;
    }

    pub fn set_polygon_style(&mut self, sink: &mut dyn RenderSink, style: Style) {
        self.restyle(sink, Kind::Polygon, &style);
        self.polygon_style = style;
    }

    fn restyle(&self, sink: &mut dyn RenderSink, kind: Kind, style: &Style) {
        for (id, _) in self.drawn.iter().filter(|(_, k)| *k == kind) {
            sink.restyle(*id, style);
        }
    }

    /// Removes `features` from the sink, resets the session and asks the
    /// sink to redraw.
    pub fn reset_area(&mut self, sink: &mut dyn RenderSink, features: &[FeatureId]) {
        for id in features {
            sink.remove_feature(*id);
        }
        self.drawn.clear();
        self.reset();
        sink.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingSink {
        features: BTreeMap<FeatureId, Feature>,
        next_id: u64,
        invalidated: usize,
    }

    impl RenderSink for RecordingSink {
        fn add_feature(&mut self, feature: Feature) -> FeatureId {
            let id = FeatureId(self.next_id);
            self.next_id += 1;
            self.features.insert(id, feature);
            id
        }
        fn remove_feature(&mut self, id: FeatureId) {
            self.features.remove(&id);
        }
        fn restyle(&mut self, id: FeatureId, new_style: &Style) {
            if let Some(Feature::LineString { style, .. } | Feature::Polygon { style, .. }) =
                self.features.get_mut(&id)
            {
                *style = new_style.clone();
            }
        }
        fn invalidate(&mut self) {
            self.invalidated += 1;
        }
    }

    fn p(lat: f64, lon: f64) -> WGS84Point {
        WGS84Point { lat, lon }
    }

    fn recording() -> (Session, Rc<RefCell<Vec<String>>>) {
        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = errors.clone();
        let session = Session::default()
            .with_reporter(move |e: &Error| sink.borrow_mut().push(e.to_string()));
        (session, errors)
    }

    fn square(session: &mut Session) {
        session.set_mode(Mode::Polygon);
        for (lat, lon) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)] {
            session.add_point(lat, lon).unwrap();
        }
    }

    #[test]
    fn test_unset_session() {
        let (mut session, errors) = recording();
        session.add_point(1.0, 2.0).unwrap();
        assert!(session.ordered_points().is_empty());
        assert_eq!(session.area(), 0.0);
        assert_eq!(session.total_line_distance(), 0.0);
        assert!(errors.borrow().is_empty());
    }

    #[test]
    fn test_square() {
        let mut session = Session::default();
        square(&mut session);
        assert_eq!(
            session.ordered_points(),
            vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)]
        );
        let area = session.area();
        assert!((area - 1.236_368_391_5e10).abs() < 1e3, "{}", area);
        assert_eq!(session.total_line_distance(), 0.0);
    }

    #[test]
    fn test_polygon_needs_three_points() {
        let mut session = Session::default();
        session.set_mode(Mode::Polygon);
        session.add_point(0.0, 0.0).unwrap();
        session.add_point(0.0, 1.0).unwrap();
        assert_eq!(session.area(), 0.0);
        assert_eq!(session.ordered_points().len(), 2);
    }

    #[test]
    fn test_line_distance() {
        let mut session = Session::default();
        session.set_mode(Mode::Line);
        session.add_point(-23.5, -46.6).unwrap();
        assert_eq!(session.total_line_distance(), 0.0);
        session.add_point(-22.9, -43.2).unwrap();
        let expected = geodesy::distance(-23.5, -46.6, -22.9, -43.2);
        assert_eq!(session.total_line_distance(), expected);
        assert!((expected - 353_827.387).abs() < 1.0);
    }

    #[test]
    fn test_line_distance_keeps_insertion_order() {
        let mut session = Session::default();
        session.set_mode(Mode::Line);
        for (lat, lon) in [(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)] {
            session.add_point(lat, lon).unwrap();
        }
        let ordered = session.ordered_points();
        assert_ne!(ordered, session.store().line());
        let expected = geodesy::path_length(session.store().line()).unwrap();
        assert_eq!(session.total_line_distance(), expected);
    }

    #[test]
    fn test_line_area() {
        let mut session = Session::default();
        session.set_mode(Mode::Line);
        session.add_point(0.0, 0.0).unwrap();
        assert_eq!(session.area(), 0.0);
        session.add_point(0.0, 1.0).unwrap();
        assert_eq!(session.area(), 0.0);
        session.add_point(1.0, 1.0).unwrap();
        let area = session.area();
        assert!(area > 0.0);
        assert_eq!(
            area,
            polygon::estimate_area(&[p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)]).unwrap()
        );
    }

    #[test]
    fn test_line_area_disallowed() {
        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = errors.clone();
        let mut session = Session::new(Options {
            line_area: LineArea::Disallowed,
            ..Options::default()
        })
        .with_reporter(move |e: &Error| sink.borrow_mut().push(e.to_string()));
        session.set_mode(Mode::Line);
        for (lat, lon) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            session.add_point(lat, lon).unwrap();
        }
        assert_eq!(session.area(), 0.0);
        assert_eq!(*errors.borrow(), vec!["operation not available in line mode"]);
        assert!(session.total_line_distance() > 0.0);
    }

    #[test]
    fn test_mode_switch_keeps_points() {
        let mut session = Session::default();
        session.set_mode(Mode::Line);
        session.add_point(0.0, 0.0).unwrap();
        session.add_point(0.0, 1.0).unwrap();
        square(&mut session);
        assert_eq!(session.store().line().len(), 2);
        assert_eq!(session.total_line_distance(), 0.0);
        session.set_mode(Mode::Line);
        assert!(session.total_line_distance() > 0.0);
    }

    #[test]
    fn test_mode_switch_clears_points() {
        let mut session = Session::new(Options {
            mode_switch: ModeSwitch::ClearInactive,
            ..Options::default()
        });
        session.set_mode(Mode::Line);
        session.add_point(0.0, 0.0).unwrap();
        session.add_point(0.0, 1.0).unwrap();
        square(&mut session);
        assert!(session.store().line().is_empty());
        session.set_mode(Mode::Line);
        assert_eq!(session.total_line_distance(), 0.0);
        assert!(session.store().polygon().is_empty());
    }

    #[test]
    fn test_malformed_point_is_reported() {
        let (mut session, errors) = recording();
        session.set_mode(Mode::Polygon);
        assert!(matches!(
            session.add_point(f64::NAN, 1.0),
            Err(Error::PointAddition { .. })
        ));
        assert_eq!(errors.borrow().len(), 1);
        assert!(errors.borrow()[0].starts_with("error adding point"));

        // still usable
        session.add_point(0.0, 0.0).unwrap();
        assert_eq!(session.store().polygon(), &[p(0.0, 0.0)]);
    }

    #[test]
    fn test_reset() {
        let mut session = Session::default();
        session.reset();
        square(&mut session);
        session.reset();
        assert_eq!(session.mode(), Mode::Unset);
        assert!(session.ordered_points().is_empty());
        assert_eq!(session.area(), 0.0);
        session.set_mode(Mode::Polygon);
        assert_eq!(session.area(), 0.0);
        assert!(session.ordered_points().is_empty());
        session.set_mode(Mode::Line);
        assert_eq!(session.total_line_distance(), 0.0);
    }

    #[test]
    fn test_reset_line() {
        let mut session = Session::default();
        session.set_mode(Mode::Line);
        for (lat, lon) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            session.add_point(lat, lon).unwrap();
        }
        assert!(session.total_line_distance() > 0.0);
        session.reset();
        assert_eq!(session.mode(), Mode::Unset);
        session.set_mode(Mode::Line);
        assert_eq!(session.total_line_distance(), 0.0);
        assert_eq!(session.area(), 0.0);
        assert!(session.ordered_points().is_empty());
        assert!(session.store().line().is_empty());
    }

    #[test]
    fn test_draw() {
        let (mut session, errors) = recording();
        let mut sink = RecordingSink::default();

        assert!(matches!(
            session.draw_polygon(&mut sink),
            Err(Error::NotEnoughPoints { needed: 3, found: 0 })
        ));
        assert!(matches!(
            session.draw_line_string(&mut sink),
            Err(Error::NotEnoughPoints { needed: 2, found: 0 })
        ));
        assert_eq!(errors.borrow().len(), 2);

        square(&mut session);
        let markers = session.draw_markers(&mut sink);
        assert_eq!(markers.len(), 4);
        let polygon = session.draw_polygon(&mut sink).unwrap();
        assert_eq!(sink.features.len(), 5);
        match &sink.features[&polygon] {
            Feature::Polygon { points, .. } => assert_eq!(points, &session.ordered_points()),
            f => panic!("unexpected {:?}", f),
        }

        let style = Style {
            fill_color: Some(0x4000_00FF),
            stroke_color: 0xFFFF_0000,
            stroke_width: 2,
        };
        session.set_polygon_style(&mut sink, style.clone());
        match &sink.features[&polygon] {
            Feature::Polygon { style: s, .. } => assert_eq!(s, &style),
            f => panic!("unexpected {:?}", f),
        }

        let mut all = markers.clone();
        all.push(polygon);
        session.reset_area(&mut sink, &all);
        assert!(sink.features.is_empty());
        assert_eq!(sink.invalidated, 1);
        assert_eq!(session.mode(), Mode::Unset);
    }

    #[test]
    fn test_draw_line_string() {
        let mut session = Session::default();
        let mut sink = RecordingSink::default();
        session.set_mode(Mode::Line);
        for (lat, lon) in [(1.0, 1.0), (0.0, 0.0), (1.0, 0.0)] {
            session.add_point(lat, lon).unwrap();
        }
        let id = session.draw_line_string(&mut sink).unwrap();
        match &sink.features[&id] {
            Feature::LineString { points, style } => {
                assert_eq!(points, session.store().line());
                assert_eq!(style, &Style::default());
            }
            f => panic!("unexpected {:?}", f),
        }
        let style = Style {
            stroke_width: 5,
            ..Style::default()
        };
        session.set_line_style(&mut sink, style.clone());
        assert!(matches!(
            &sink.features[&id],
            Feature::LineString { style: s, .. } if *s == style
        ));
    }
}
