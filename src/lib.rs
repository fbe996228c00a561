//! Ingestion pipeline for SWAT's fixed-width output.hru files.
//!
//! swat.exe writes positionally encoded text with no delimiters, a dynamic
//! set of value columns, partial temporal encodings that depend on the
//! print code, and column offsets that silently shifted in rev.670. This
//! crate detects the layout revision, maps the header to the OutputHru
//! schema, reconstructs calendar dates, and loads every row into SQLite in
//! a single transaction per file.

pub mod config;
pub mod error;
pub mod field;
pub mod header;
pub mod layout;
pub mod reader;
pub mod temporal;

pub use config::{PrintMode, SwatConfig};
pub use error::IngestError;
pub use reader::ingest_output_hru;
