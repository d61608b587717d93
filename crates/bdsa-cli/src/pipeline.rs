//! Harmonization pipeline with explicit stages.
//!
//! 1. **Ingest**: read the dataset (CSV or JSON records)
//! 2. **Map**: copy mapped source columns into the standardized fields
//! 3. **Filter**: optionally keep only rows whose slide file exists locally
//! 4. **Shim**: normalize vocabulary with the shim dictionary, if available
//! 5. **Validate**: schema-conformance statistics, if a schema is configured
//!
//! Every stage takes the previous stage's dataset and returns a new one.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use tracing::{debug, info, info_span, trace, warn};

use bdsa_ingest::{
    CsvOptions, list_files, load_mapping, load_schema, load_shim_dictionary, read_dataset,
};
use bdsa_map::{FieldBinding, map_columns_with_outcome};
use bdsa_model::{
    CanonicalField, ColumnMapping, Dataset, SchemaDocument, ShimDictionary, ValidationReport,
};
use bdsa_report::InputRecord;
use bdsa_transform::{
    FieldRewrites, FilesetFilter, LintFinding, extend_to_standardized, lint_dictionary,
    resolve_with_outcome, retain_local_files,
};
use bdsa_validate::{ValidationOptions, validate_with};

use crate::logging::redact_value;

/// Read the dataset file.
pub fn ingest(path: &Path, csv: CsvOptions) -> Result<Dataset> {
    let _span = info_span!("ingest", path = %path.display()).entered();
    let dataset = read_dataset(path, csv).with_context(|| format!("read dataset {}", path.display()))?;
    info!(rows = dataset.len(), columns = dataset.columns().len(), "dataset loaded");
    Ok(dataset)
}

/// Load the shim dictionary, or `None` when the file cannot be obtained.
/// A dictionary that exists but is malformed is an error.
pub fn load_optional_dictionary(path: &Path) -> Result<Option<ShimDictionary>> {
    match load_shim_dictionary(path) {
        Ok(dictionary) => Ok(Some(dictionary)),
        Err(error) if error.is_unavailable() => {
            warn!(path = %path.display(), %error, "shim dictionary unavailable; shim step skipped");
            Ok(None)
        }
        Err(error) => Err(error).context("load shim dictionary"),
    }
}

pub fn load_required_schema(path: &Path) -> Result<SchemaDocument> {
    load_schema(path).context("schema is required for validation")
}

/// Log dictionary lint findings and return them.
pub fn lint(dictionary: &ShimDictionary) -> Vec<LintFinding> {
    let findings = lint_dictionary(dictionary);
    for finding in &findings {
        warn!(%finding, "shim dictionary lint");
    }
    findings
}

#[derive(Debug, Clone, Default)]
pub struct HarmonizeOptions {
    pub dataset: PathBuf,
    pub csv: CsvOptions,
    pub mapping: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    /// Directory holding the local slide files.
    pub files_dir: Option<PathBuf>,
    /// Histogram switches; the loaded mapping is filled in by the pipeline.
    pub validation: ValidationOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesetSummary {
    /// `None` when the dataset had no filename column.
    pub column: Option<&'static str>,
    pub local_files: usize,
    pub dropped: usize,
}

#[derive(Debug, Clone)]
pub struct HarmonizeResult {
    pub dataset: Dataset,
    pub bindings: Vec<(CanonicalField, FieldBinding)>,
    pub fileset: Option<FilesetSummary>,
    /// `None` when no dictionary was configured or it was unavailable.
    pub rewrites: Option<IndexMap<String, FieldRewrites>>,
    pub lint: Vec<LintFinding>,
    pub report: Option<ValidationReport>,
    pub inputs: Vec<InputRecord>,
}

pub fn harmonize(options: &HarmonizeOptions) -> Result<HarmonizeResult> {
    let dataset = ingest(&options.dataset, options.csv)?;
    let mut inputs = vec![InputRecord::from_path("dataset", &options.dataset)?];

    // Stage 2: map
    let mapping = match &options.mapping {
        Some(path) => {
            let mapping = load_mapping(path).context("load column mapping")?;
            inputs.push(InputRecord::from_path("mapping", path)?);
            mapping
        }
        None => ColumnMapping::new(),
    };
    let mapped = {
        let _span = info_span!("map").entered();
        map_columns_with_outcome(&dataset, &mapping)
    };
    let bindings = mapped.bindings;
    let mut dataset = mapped.dataset;

    // Stage 3: local-file filter
    let fileset = match &options.files_dir {
        Some(dir) => {
            let files = list_files(dir).context("list local files")?;
            let summary = match retain_local_files(&dataset, &files) {
                FilesetFilter::Filtered {
                    dataset: kept,
                    column,
                    dropped,
                } => {
                    dataset = kept;
                    FilesetSummary {
                        column: Some(column),
                        local_files: files.len(),
                        dropped,
                    }
                }
                FilesetFilter::NoFileColumn(_) => FilesetSummary {
                    column: None,
                    local_files: files.len(),
                    dropped: 0,
                },
            };
            info!(dropped = summary.dropped, "local-file filter");
            Some(summary)
        }
        None => None,
    };

    // Stage 4: shim
    let mut lint_findings = Vec::new();
    let mut rewrites = None;
    if let Some(path) = &options.dictionary
        && let Some(dictionary) = load_optional_dictionary(path)?
    {
        let _span = info_span!("shim").entered();
        inputs.push(InputRecord::from_path("dictionary", path)?);
        lint_findings = lint(&dictionary);
        let outcome = resolve_with_outcome(&dataset, &extend_to_standardized(&dictionary));
        info!(rewritten = outcome.total_rewritten(), "shim dictionary applied");
        dataset = outcome.dataset;
        rewrites = Some(outcome.rewrites);
    }

    // Stage 5: validate
    let report = match &options.schema {
        Some(path) => {
            let schema = load_required_schema(path)?;
            inputs.push(InputRecord::from_path("schema", path)?);
            let validation = options.validation.clone().with_mapping(mapping);
            Some(run_validation(&dataset, &schema, &validation))
        }
        None => {
            debug!("no schema configured; validation skipped");
            None
        }
    };

    Ok(HarmonizeResult {
        dataset,
        bindings,
        fileset,
        rewrites,
        lint: lint_findings,
        report,
        inputs,
    })
}

/// Validate and log the histograms at trace level.
pub fn run_validation(
    dataset: &Dataset,
    schema: &SchemaDocument,
    options: &ValidationOptions,
) -> ValidationReport {
    let _span = info_span!("validate").entered();
    let report = validate_with(dataset, schema, options);
    for (field, histogram) in &report.histograms {
        for (value, count) in histogram.counts.iter() {
            trace!(field = %field, value = redact_value(value), count, "histogram entry");
        }
    }
    info!(
        rows = report.total_rows,
        valid_files = report.files.valid_count,
        "validation complete"
    );
    report
}
