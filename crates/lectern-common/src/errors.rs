use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextLayerError {
    #[error("text divs and strings have not been set")]
    NotMapped,

    #[error("{0} is already enabled")]
    AlreadyEnabled(&'static str),

    #[error("invalid search pattern: {0}")]
    InvalidPattern(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LecternError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    TextLayer(#[from] TextLayerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
