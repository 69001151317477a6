pub mod error;
pub mod geodesy;
pub mod mercator;
pub mod point;
pub mod polygon;
pub mod read_polygon;
pub mod reference;
pub mod render;
pub mod session;
pub mod store;
pub mod svg;
pub mod triangulation;

pub use error::{Error, Result};
pub use point::WGS84Point;
pub use session::{Options, Session};
pub use store::Mode;
