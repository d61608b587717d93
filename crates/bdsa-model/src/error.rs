use thiserror::Error;

/// Contract violations in caller-supplied configuration documents.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("schema document must be a JSON object")]
    SchemaNotObject,
    #[error("schema document has no \"properties\" object")]
    SchemaMissingProperties,
    #[error("shim dictionary is malformed: {0}")]
    ShimDictionary(String),
    #[error("column mapping is malformed: {0}")]
    ColumnMapping(String),
    #[error("field '{field}' holds a nested value; datasets must be tabular")]
    NonTabular { field: String },
    #[error("unknown canonical field: {0}")]
    UnknownField(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
