use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(String),
    #[error("failed to deserialize config: {0}")]
    Deserialize(String),
    #[error("config validation error: {0}")]
    Validation(String),
}
