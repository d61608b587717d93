//! JSON configuration documents.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use bdsa_model::{ColumnMapping, ModelError, SchemaDocument, ShimDictionary};

use crate::error::{IngestError, Result};

pub(crate) fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => IngestError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn parse_json(path: &Path, raw: &str) -> Result<serde_json::Value> {
    serde_json::from_str(raw).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn model_error(path: &Path) -> impl FnOnce(ModelError) -> IngestError + '_ {
    move |source| IngestError::Model {
        path: path.to_path_buf(),
        source,
    }
}

/// Load the schema document. A missing or unreadable file is
/// [`IngestError::SchemaUnavailable`].
pub fn load_schema(path: &Path) -> Result<SchemaDocument> {
    let raw = std::fs::read_to_string(path).map_err(|source| IngestError::SchemaUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let value = parse_json(path, &raw)?;
    let schema = SchemaDocument::from_value(&value).map_err(model_error(path))?;
    debug!(
        path = %path.display(),
        properties = schema.property_names().count(),
        "loaded schema"
    );
    Ok(schema)
}

pub fn load_shim_dictionary(path: &Path) -> Result<ShimDictionary> {
    let raw = read_text(path)?;
    let value = parse_json(path, &raw)?;
    let dictionary = ShimDictionary::from_value(value).map_err(model_error(path))?;
    debug!(
        path = %path.display(),
        fields = dictionary.fields().count(),
        "loaded shim dictionary"
    );
    Ok(dictionary)
}

pub fn load_mapping(path: &Path) -> Result<ColumnMapping> {
    let raw = read_text(path)?;
    let value = parse_json(path, &raw)?;
    let mapping = ColumnMapping::from_value(value).map_err(model_error(path))?;
    debug!(path = %path.display(), "loaded column mapping");
    Ok(mapping)
}
