#![deny(unsafe_code)]

//! Output writers: CSV export in the standardized-first column order and
//! JSON report envelopes that record which inputs produced a report.

mod envelope;
mod export;
mod hash;

pub use envelope::{InputRecord, ReportEnvelope, write_envelope};
pub use export::{export_columns, write_csv, write_csv_file};
pub use hash::{sha256_file, sha256_hex};
