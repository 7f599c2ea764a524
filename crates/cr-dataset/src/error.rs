use thiserror::Error;

use cr_core::CoreError;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("city {city:?} appears in both {first_region:?} and {second_region:?}")]
    DuplicateCity {
        city: String,
        first_region: String,
        second_region: String,
    },

    #[error("line {line}: invalid coordinate ({lat}, {lon}) for {city:?}")]
    InvalidCoordinate { line: usize, city: String, lat: f64, lon: f64 },

    #[error("line {line}: empty {field} name")]
    EmptyName { line: usize, field: &'static str },

    #[error("unknown region {0:?}")]
    UnknownRegion(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type DatasetResult<T> = Result<T, DatasetError>;
