//! File-backed inputs for the harmonization pipeline.
//!
//! Datasets are read from CSV (or JSON record arrays); the schema, shim
//! dictionary and column mapping are JSON documents. Load failures are
//! classified so callers can tell an unavailable document from a malformed
//! one, see [`IngestError::is_unavailable`].

pub mod dataset;
pub mod discovery;
pub mod error;
pub mod loaders;

pub use dataset::{CsvOptions, normalize_header, read_csv, read_dataset, read_json_records};
pub use discovery::list_files;
pub use error::{IngestError, Result};
pub use loaders::{load_mapping, load_schema, load_shim_dictionary};
