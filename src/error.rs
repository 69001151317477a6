use crate::store::Mode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot compute the centroid of an empty point set")]
    EmptyInput,

    #[error("error adding point (lat: {lat}, lon: {lon})")]
    PointAddition { lat: f64, lon: f64 },

    #[error("operation not available in {0} mode")]
    InvalidMode(Mode),

    #[error("not enough points: {needed} needed, {found} found")]
    NotEnoughPoints { needed: usize, found: usize },

    #[error("non-finite {0}")]
    NonFinite(&'static str),

    #[error("projection error: {0}")]
    Projection(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
