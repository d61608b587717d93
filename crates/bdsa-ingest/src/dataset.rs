//! Dataset readers.

use std::collections::HashSet;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use bdsa_model::{Dataset, Row};

use crate::error::{IngestError, Result};

/// Options for reading CSV datasets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Rewrite headers with [`normalize_header`].
    #[serde(default)]
    pub normalize_headers: bool,
}

/// Lowercase, spaces and dots to underscores, and either spelling of the
/// filename column to `fileName`.
pub fn normalize_header(raw: &str) -> String {
    let normalized = raw.to_lowercase().replace([' ', '.'], "_");
    match normalized.as_str() {
        "filename" | "file_name" => "fileName".to_string(),
        _ => normalized,
    }
}

/// Read a dataset, choosing the reader from the file extension (`.csv` or
/// `.json`).
pub fn read_dataset(path: &Path, options: CsvOptions) -> Result<Dataset> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => read_csv(path, options),
        Some("json") => read_json_records(path),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Read a CSV file with a header row.
///
/// Header cells lose a leading BOM and surrounding whitespace; data cells are
/// kept verbatim. Short records are empty-filled; a record of delimiters
/// only (`,,`) is kept as an empty row and counts toward the row total.
/// Blank lines carry no record and are not rows.
pub fn read_csv(path: &Path, options: CsvOptions) -> Result<Dataset> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let csv_error = |err: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|cell| {
            let cell = cell.trim_start_matches('\u{feff}').trim();
            if options.normalize_headers {
                normalize_header(cell)
            } else {
                cell.to_string()
            }
        })
        .collect();

    let mut seen = HashSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateColumn {
                column: header.clone(),
                path: path.to_path_buf(),
            });
        }
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        if record.len() > headers.len() {
            warn!(
                path = %path.display(),
                record = index + 1,
                extra = record.len() - headers.len(),
                "record has more cells than headers; extra cells dropped"
            );
        }
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header.as_str(), record.get(idx).unwrap_or("")))
            .collect();
        rows.push(row);
    }
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read csv dataset"
    );
    Ok(Dataset::with_columns(headers, rows))
}

/// Read a JSON array of flat records.
pub fn read_json_records(path: &Path) -> Result<Dataset> {
    let raw = crate::loaders::read_text(path)?;
    let rows: Vec<Row> = serde_json::from_str(&raw).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows = rows.len(), "read json dataset");
    Ok(Dataset::from_rows(rows))
}
