//! Restrict a dataset to slides present in a local file set.

use std::collections::HashSet;

use tracing::{debug, warn};

use bdsa_model::{Dataset, FILE_NAME_ALIASES, Row, resolve_column};

/// Column carrying slide file names, resolved through [`FILE_NAME_ALIASES`].
pub fn file_name_column(dataset: &Dataset) -> Option<&'static str> {
    resolve_column(FILE_NAME_ALIASES.iter().copied(), dataset.columns())
}

/// Result of [`retain_local_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilesetFilter {
    Filtered {
        dataset: Dataset,
        column: &'static str,
        dropped: usize,
    },
    /// No filename column; rows passed through unchanged.
    NoFileColumn(Dataset),
}

impl FilesetFilter {
    pub fn dataset(&self) -> &Dataset {
        match self {
            Self::Filtered { dataset, .. } | Self::NoFileColumn(dataset) => dataset,
        }
    }

    pub fn into_dataset(self) -> Dataset {
        match self {
            Self::Filtered { dataset, .. } | Self::NoFileColumn(dataset) => dataset,
        }
    }
}

/// Keep rows whose filename value is one of `file_names`.
pub fn retain_local_files<S: AsRef<str>>(dataset: &Dataset, file_names: &[S]) -> FilesetFilter {
    let Some(column) = file_name_column(dataset) else {
        warn!(
            candidates = ?FILE_NAME_ALIASES,
            "no filename column; local-file filter skipped"
        );
        return FilesetFilter::NoFileColumn(dataset.clone());
    };
    let local: HashSet<&str> = file_names.iter().map(|name| name.as_ref()).collect();
    let rows: Vec<Row> = dataset
        .rows()
        .iter()
        .filter(|row| local.contains(row.value(column)))
        .cloned()
        .collect();
    let dropped = dataset.len() - rows.len();
    debug!(column, kept = rows.len(), dropped, "local-file filter applied");
    FilesetFilter::Filtered {
        dataset: Dataset::with_columns(dataset.columns().to_vec(), rows),
        column,
        dropped,
    }
}
