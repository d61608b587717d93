#![deny(unsafe_code)]

//! Column mapping: copy the source columns selected by a [`ColumnMapping`]
//! into the standardized `bdsa*` fields, and suggest mappings for datasets
//! that have none yet.
//!
//! [`ColumnMapping`]: bdsa_model::ColumnMapping

mod mapper;
mod suggest;
mod utils;

pub use mapper::{FieldBinding, MappedDataset, map_columns, map_columns_with_outcome, output_columns};
pub use suggest::{
    DEFAULT_MIN_CONFIDENCE, MappingSuggestion, SuggestionResult, Suggester, suggest_mapping,
};
pub use utils::normalize_text;
