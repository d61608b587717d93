use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use bdsa_cli::config::Config;
use bdsa_cli::pipeline::{
    HarmonizeOptions, harmonize, ingest, lint, load_optional_dictionary, load_required_schema,
    run_validation,
};
use bdsa_ingest::{CsvOptions, load_mapping};
use bdsa_map::{Suggester, map_columns_with_outcome};
use bdsa_model::ValidationReport;
use bdsa_report::{InputRecord, ReportEnvelope, write_csv_file, write_envelope};
use bdsa_transform::{extend_to_standardized, resolve_with_outcome};
use bdsa_validate::ValidationOptions;

use crate::cli::{
    DatasetArgs, HarmonizeArgs, HistogramArgs, MapArgs, ShimArgs, SuggestArgs, ValidateArgs,
};
use crate::summary::{
    print_bindings, print_fileset, print_report, print_rewrites, print_suggestions,
};

pub fn run_map(args: &MapArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let dataset = ingest(&args.input.dataset, csv_options(&args.input, &config))?;
    let mapping_path = args
        .mapping
        .as_ref()
        .or(config.inputs.mapping.as_ref())
        .ok_or_else(|| anyhow!("no column mapping given (use --mapping or [inputs].mapping)"))?;
    let mapping = load_mapping(mapping_path).context("load column mapping")?;

    let mapped = map_columns_with_outcome(&dataset, &mapping);
    print_bindings(&mapped.bindings);
    let output = export_path(args.output.as_ref(), &config);
    write_csv_file(&mapped.dataset, &output)?;
    println!("Exported: {}", output.display());
    Ok(())
}

pub fn run_shim(args: &ShimArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let dataset = ingest(&args.input.dataset, csv_options(&args.input, &config))?;
    let dictionary_path = args
        .dictionary
        .as_ref()
        .or(config.inputs.dictionary.as_ref())
        .ok_or_else(|| {
            anyhow!("no shim dictionary given (use --dictionary or [inputs].dictionary)")
        })?;

    let output = export_path(args.output.as_ref(), &config);
    let Some(dictionary) = load_optional_dictionary(dictionary_path)? else {
        println!("Shim dictionary unavailable; dataset exported unchanged.");
        write_csv_file(&dataset, &output)?;
        println!("Exported: {}", output.display());
        return Ok(());
    };
    lint(&dictionary);
    let outcome = resolve_with_outcome(&dataset, &extend_to_standardized(&dictionary));
    print_rewrites(&outcome.rewrites);
    write_csv_file(&outcome.dataset, &output)?;
    println!("Exported: {}", output.display());
    Ok(())
}

pub fn run_validate(args: &ValidateArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let dataset = ingest(&args.input.dataset, csv_options(&args.input, &config))?;
    let schema_path = args
        .schema
        .as_ref()
        .or(config.inputs.schema.as_ref())
        .ok_or_else(|| anyhow!("no schema given (use --schema or [inputs].schema)"))?;
    let schema = load_required_schema(schema_path)?;

    let mut inputs = vec![
        InputRecord::from_path("dataset", &args.input.dataset)?,
        InputRecord::from_path("schema", schema_path)?,
    ];
    let mut options = validation_options(&args.histograms, &config);
    if let Some(path) = args.mapping.as_ref().or(config.inputs.mapping.as_ref()) {
        options = options.with_mapping(load_mapping(path).context("load column mapping")?);
        inputs.push(InputRecord::from_path("mapping", path)?);
    }

    let report = run_validation(&dataset, &schema, &options);
    print_report(&report);
    if let Some(path) = &args.report {
        write_report(path, &report, inputs)?;
    }
    Ok(())
}

pub fn run_harmonize(args: &HarmonizeArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let span = info_span!("harmonize", dataset = %args.input.dataset.display());
    let _guard = span.enter();

    let options = HarmonizeOptions {
        dataset: args.input.dataset.clone(),
        csv: csv_options(&args.input, &config),
        mapping: args.mapping.clone().or(config.inputs.mapping.clone()),
        dictionary: args.dictionary.clone().or(config.inputs.dictionary.clone()),
        schema: args.schema.clone().or(config.inputs.schema.clone()),
        files_dir: args.files_dir.clone(),
        validation: validation_options(&args.histograms, &config),
    };
    let result = harmonize(&options)?;

    print_bindings(&result.bindings);
    if let Some(fileset) = &result.fileset {
        print_fileset(fileset);
    }
    if let Some(rewrites) = &result.rewrites {
        print_rewrites(rewrites);
    }
    if let Some(report) = &result.report {
        print_report(report);
        if let Some(path) = &args.report {
            write_report(path, report, result.inputs.clone())?;
        }
    } else if args.report.is_some() {
        return Err(anyhow!("--report needs a schema (use --schema or [inputs].schema)"));
    }
    if !args.no_export {
        let output = export_path(args.output.as_ref(), &config);
        write_csv_file(&result.dataset, &output)?;
        println!("Exported: {}", output.display());
    }
    info!(rows = result.dataset.len(), "harmonize complete");
    Ok(())
}

pub fn run_suggest(args: &SuggestArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let dataset = ingest(&args.input.dataset, csv_options(&args.input, &config))?;
    let result = Suggester::new(args.min_confidence).suggest(dataset.columns());
    print_suggestions(&result);
    if let Some(path) = &args.write {
        let mut json = serde_json::to_string_pretty(&result.to_mapping())
            .context("serialize mapping")?;
        json.push('\n');
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        println!("Mapping written: {}", path.display());
    }
    Ok(())
}

fn csv_options(input: &DatasetArgs, config: &Config) -> CsvOptions {
    let mut options = config.csv_options();
    options.normalize_headers |= input.normalize_headers;
    options
}

fn validation_options(args: &HistogramArgs, config: &Config) -> ValidationOptions {
    let mut options = config.validation_options();
    if let Some(mode) = args.stain {
        options.stain_histogram = mode.into();
    }
    if let Some(mode) = args.region {
        options.region_histogram = mode.into();
    }
    options
}

fn export_path(explicit: Option<&PathBuf>, config: &Config) -> PathBuf {
    explicit
        .cloned()
        .unwrap_or_else(|| PathBuf::from(&config.export.file_name))
}

fn write_report(path: &Path, report: &ValidationReport, inputs: Vec<InputRecord>) -> Result<()> {
    let envelope = inputs
        .into_iter()
        .fold(ReportEnvelope::new(report.total_rows, report), |envelope, input| {
            envelope.with_input(input)
        });
    write_envelope(&envelope, path)?;
    println!("Report: {}", path.display());
    Ok(())
}
