use clap::{Parser, ValueEnum};
use map_area::read_polygon::{self, Shape};
use map_area::render::Style;
use map_area::session::LineArea;
use map_area::svg::SvgSink;
use map_area::{Error, Mode, Options, Session, WGS84Point};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Line,
    Polygon,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LineAreaArg {
    ClosedFan,
    Disallowed,
}

#[derive(Parser)]
#[command(about = "Measures lines and polygons given as lat/lon points")]
struct Cli {
    /// kml, gpx or geojson file
    path: Option<String>,
    /// Point as LAT,LON, may be repeated
    #[arg(long = "point", value_parser = parse_point, allow_hyphen_values = true)]
    points: Vec<WGS84Point>,
    /// Shape drawn by the --point list
    #[arg(long, value_enum, default_value = "polygon", env = "MAP_AREA_MODE")]
    mode: ModeArg,
    #[arg(long, value_enum, default_value = "closed-fan", env = "MAP_AREA_LINE_AREA")]
    line_area: LineAreaArg,
    /// Writes the shapes to this svg file
    #[arg(long, env = "MAP_AREA_SVG")]
    svg: Option<String>,
}

fn parse_point(s: &str) -> Result<WGS84Point, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {}", s))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("{}: {}", lat, e))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("{}: {}", lon, e))?;
    WGS84Point::new(lat, lon).map_err(|e| e.to_string())
}

fn run(args: Cli) -> Result<(), Error> {
    let mut shapes = match &args.path {
        Some(path) => read_polygon::read_shapes(path)?,
        None => Vec::new(),
    };
    if !args.points.is_empty() {
        let mode = match args.mode {
            ModeArg::Line => Mode::Line,
            ModeArg::Polygon => Mode::Polygon,
        };
        shapes.push(Shape {
            mode,
            wgs: args.points.clone(),
        });
    }
    log::trace!("shapes: {}", shapes.len());

    let options = Options {
        line_area: match args.line_area {
            LineAreaArg::ClosedFan => LineArea::ClosedFan,
            LineAreaArg::Disallowed => LineArea::Disallowed,
        },
        ..Options::default()
    };
    let mut sink = match &args.svg {
        Some(_) => Some(SvgSink::new()?),
        None => None,
    };
    let polygon_style = Style {
        fill_color: Some(0x4000_00FF),
        stroke_color: 0xFFFF_0000,
        stroke_width: 3,
    };

    for (i, shape) in shapes.iter().enumerate() {
        let mut session = Session::new(options.clone());
        session.set_mode(shape.mode);
        for p in &shape.wgs {
            // errors go to the session's reporter
            let _ = session.add_point(p.lat, p.lon);
        }
        session.info();

        println!("shape {} ({}, {} points)", i, shape.mode, shape.wgs.len());
        let ordered_points = session.ordered_points();
        let ordered = ordered_points
            .iter()
            .map(|p| format!("({:.6}, {:.6})", p.lat, p.lon))
            .collect::<Vec<String>>()
            .join(" ");
        println!(" ordered: {}", ordered);
        println!("    area: {:.1} m2", session.area());
        if shape.mode == Mode::Line {
            println!("distance: {:.1} m", session.total_line_distance());
        } else {
            let reference = map_area::reference::geodesic_area(&ordered_points);
            println!("geodesic: {:.1} m2 (geo crate)", reference);
        }
        println!();

        if let Some(sink) = sink.as_mut() {
            session.draw_markers(sink);
            match shape.mode {
                Mode::Line => {
                    let _ = session.draw_line_string(sink);
                }
                Mode::Polygon => {
                    session.set_polygon_style(sink, polygon_style.clone());
                    let _ = session.draw_polygon(sink);
                }
                Mode::Unset => {}
            }
        }
    }

    if let (Some(path), Some(sink)) = (&args.svg, &sink) {
        std::fs::write(path, sink.render()?)?;
        log::info!("svg: written to {}", path);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Cli::parse();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
