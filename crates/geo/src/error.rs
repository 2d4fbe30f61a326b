use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoError>;

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    /// Text that is not exactly two comma-separated numbers
    #[error("Invalid point: {0:?}")]
    InvalidPoint(String),
}
