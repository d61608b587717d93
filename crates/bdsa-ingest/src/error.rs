//! Error types for BDSA metadata ingestion.

use std::path::PathBuf;

use bdsa_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Schema document missing or unreadable; fatal for validation only.
    #[error("schema unavailable: {path}: {source}")]
    SchemaUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported dataset format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Well-formed JSON that breaks a document contract.
    #[error("{path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl IngestError {
    /// True when the file could not be obtained at all, as opposed to being
    /// present but malformed.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::SchemaUnavailable { .. } | Self::FileNotFound { .. } | Self::FileRead { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
