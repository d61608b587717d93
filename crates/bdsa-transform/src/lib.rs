//! Value-level transformations over harmonized datasets.
//!
//! - **shim**: rewrite raw vocabulary onto canonical terms with a
//!   [`ShimDictionary`](bdsa_model::ShimDictionary)
//! - **lint**: report suspicious dictionary entries without failing
//! - **fileset**: keep only rows whose slide file is available locally

pub mod fileset;
pub mod lint;
pub mod shim;

pub use fileset::{FilesetFilter, file_name_column, retain_local_files};
pub use lint::{LintFinding, lint_dictionary};
pub use shim::{
    FieldRewrites, ShimOutcome, extend_to_standardized, resolve, resolve_with_outcome,
};
