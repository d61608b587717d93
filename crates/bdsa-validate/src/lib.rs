//! Schema conformance statistics.
//!
//! [`validate`] classifies the governed fields of every row against the
//! schema enumerations and aggregates valid/invalid counts, value histograms
//! and the composite "usable file" count into a
//! [`ValidationReport`](bdsa_model::ValidationReport).

mod engine;
mod options;

pub use engine::{effective_column, validate, validate_with};
pub use options::ValidationOptions;
