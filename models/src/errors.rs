// models/src/errors.rs

pub use thiserror::Error;

use chrono::ParseError as TimestampParseError;
use serde_json::Error as SerdeJsonError;

use crate::identifiers::VertexId;

pub type GraphResult<T> = Result<T, GraphError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type RecordResult<T> = Result<T, RecordError>;

/// Contract violations raised by the graph store. These are caller bugs,
/// not data problems: the processor only queries the median after an
/// accepted insert, so neither variant occurs on a well-behaved run.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex {0} is not present in the current window")]
    NotFound(VertexId),
    #[error("median degree is undefined for an empty graph")]
    EmptyGraph,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("identifiers must be between 1 and 255 bytes")]
    InvalidIdentifierLength,
}

/// A single bad input record. Always recovered locally: the processor logs
/// the failure and moves on to the next line.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("line is not valid JSON: {0}")]
    Malformed(#[from] SerdeJsonError),
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),
    #[error("created_time is not a YYYY-MM-DDTHH:MM:SSZ timestamp: {0}")]
    Timestamp(#[from] TimestampParseError),
}
