use thiserror::Error;

#[derive(Debug, Error)]
pub enum BioModelsError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Unparsable creation date: {0}")]
    Date(String),

    #[error("Tuple #{position}: {side} descriptor has no 'name' key")]
    MissingName { side: &'static str, position: usize },

    #[error("Ontology lookup error: {0}")]
    Lookup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    SecurityError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BioModelsError>;
