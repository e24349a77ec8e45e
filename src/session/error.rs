use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("session not found: {0}")]
    NotFound(String),
    #[error("invalid session key: {0}")]
    InvalidKey(String),
    #[error("session file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid session YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),
}
