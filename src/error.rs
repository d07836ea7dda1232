use thiserror::Error;

#[derive(Error, Debug)]
pub enum BagtagError {
    #[error("dataset file not found: {0}")]
    DatasetNotFound(String),

    #[error("dataset parse error: {0}")]
    DatasetParse(String),

    #[error("badge definitions not found: {0}")]
    DefinitionsNotFound(String),

    #[error("badge definitions parse error: {0}")]
    DefinitionsParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BagtagError>;
