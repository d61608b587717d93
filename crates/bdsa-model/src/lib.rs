//! Data model for the BDSA metadata harmonization engine.
//!
//! Everything here is plain data: datasets, the canonical field set, and the
//! three caller-owned configuration documents (column mapping, shim
//! dictionary, schema). Nothing in this crate performs I/O.

pub mod dataset;
pub mod error;
pub mod fields;
pub mod lookup;
pub mod mapping;
pub mod report;
pub mod schema;
pub mod shim;

pub use dataset::{Dataset, Row};
pub use error::{ModelError, Result};
pub use fields::{CanonicalField, FILE_NAME_ALIASES};
pub use lookup::resolve_column;
pub use mapping::ColumnMapping;
pub use report::{
    FieldOutcome, FieldStats, FileValidity, Histogram, HistogramMode, NOT_FOUND_TEXT,
    ValidationReport, ValueCounts, format_percentage,
};
pub use schema::{PropertyEnum, SchemaDocument};
pub use shim::{FieldSynonyms, ShimDictionary};
