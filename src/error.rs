use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("invalid output file {path:?}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("header label '{label}' does not match any OutputHru value column")]
    SchemaMismatch { label: String },

    #[error("cannot parse '{value}' at column {offset} as {expected} ({field})")]
    FieldParse {
        field: &'static str,
        offset: usize,
        value: String,
        expected: &'static str,
    },

    #[error("line too short: field '{field}' starts at column {offset}")]
    LineTooShort { field: &'static str, offset: usize },

    #[error("julian day {day} is out of range for year {year}")]
    InvalidJulianDay { day: u32, year: i32 },
}

pub type Result<T> = std::result::Result<T, IngestError>;
