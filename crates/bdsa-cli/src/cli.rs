//! CLI argument definitions for `bdsa`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bdsa_model::HistogramMode;

#[derive(Parser)]
#[command(
    name = "bdsa",
    version,
    about = "BDSA metadata harmonization - map, normalize and validate slide metadata",
    long_about = "Harmonize free-form slide metadata against the BDSA schema.\n\n\
                  Maps source columns onto bdsaCaseID/bdsaRegionID/bdsaStainID,\n\
                  rewrites vocabulary with a shim dictionary, and reports schema\n\
                  conformance for stainID and regionName."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: ./bdsa.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Copy mapped source columns into the standardized bdsa* fields.
    Map(MapArgs),

    /// Rewrite raw values onto canonical terms with a shim dictionary.
    Shim(ShimArgs),

    /// Report schema conformance for stainID, regionName and caseID.
    Validate(ValidateArgs),

    /// Run map, shim and validate in sequence.
    Harmonize(HarmonizeArgs),

    /// Propose a column mapping from the dataset's column names.
    Suggest(SuggestArgs),
}

#[derive(Args)]
pub struct DatasetArgs {
    /// Metadata file (.csv or .json records).
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Lowercase headers and replace spaces and dots with underscores.
    #[arg(long = "normalize-headers")]
    pub normalize_headers: bool,
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub input: DatasetArgs,

    /// Column mapping JSON (`{"caseID": "Case_Num", ...}`).
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Export path (default: [export].file_name from the config).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShimArgs {
    #[command(flatten)]
    pub input: DatasetArgs,

    /// Shim dictionary JSON.
    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Export path (default: [export].file_name from the config).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: DatasetArgs,

    /// Schema document JSON.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Column mapping consulted when a standardized field is empty.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    #[command(flatten)]
    pub histograms: HistogramArgs,

    /// Write the report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
pub struct HarmonizeArgs {
    #[command(flatten)]
    pub input: DatasetArgs,

    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Keep only rows whose file name is present in this directory.
    #[arg(long = "files-dir", value_name = "DIR")]
    pub files_dir: Option<PathBuf>,

    #[command(flatten)]
    pub histograms: HistogramArgs,

    /// Export path (default: [export].file_name from the config).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip writing the CSV export.
    #[arg(long = "no-export")]
    pub no_export: bool,

    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
pub struct HistogramArgs {
    /// Which stainID values the histogram counts.
    #[arg(long = "stain-histogram", value_enum)]
    pub stain: Option<HistogramArg>,

    /// Which regionName values the histogram counts.
    #[arg(long = "region-histogram", value_enum)]
    pub region: Option<HistogramArg>,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub input: DatasetArgs,

    /// Minimum similarity score for a suggestion (0.0 - 1.0).
    #[arg(
        long = "min-confidence",
        default_value_t = bdsa_map::DEFAULT_MIN_CONFIDENCE,
        value_parser = parse_confidence
    )]
    pub min_confidence: f32,

    /// Write the suggested mapping as JSON.
    #[arg(long = "write", value_name = "PATH")]
    pub write: Option<PathBuf>,
}

fn parse_confidence(raw: &str) -> Result<f32, String> {
    let value: f32 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(format!("'{raw}' must be between 0.0 and 1.0"));
    }
    Ok(value)
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HistogramArg {
    Valid,
    Invalid,
}

impl From<HistogramArg> for HistogramMode {
    fn from(arg: HistogramArg) -> Self {
        match arg {
            HistogramArg::Valid => HistogramMode::Valid,
            HistogramArg::Invalid => HistogramMode::Invalid,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_confidence_must_be_a_finite_fraction() {
        assert_eq!(parse_confidence("0.9"), Ok(0.9));
        assert!(parse_confidence("NaN").is_err());
        assert!(parse_confidence("inf").is_err());
        assert!(parse_confidence("1.5").is_err());
        assert!(parse_confidence("high").is_err());
    }

    #[test]
    fn suggest_rejects_nan_threshold() {
        let parsed = Cli::try_parse_from(["bdsa", "suggest", "meta.csv", "--min-confidence", "NaN"]);
        assert!(parsed.is_err());
    }
}
