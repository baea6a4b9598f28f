//! Error types for the engines.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cell index {index} out of range for grid of {len} cells")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("coordinates ({row}, {col}) out of range for {rows}x{cols} grid")]
    CoordinatesOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("no free cell left to place an occupant")]
    NoFreePlacement,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
