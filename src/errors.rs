use thiserror::Error;

#[derive(Error, Debug)]
pub enum KbRagError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The page could not be retrieved from its URL
    #[error("{0}")]
    Fetch(String),

    /// The caller sent something we can't work with
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    EmptyKnowledgeBase(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Custom(String),
}

impl KbRagError {
    /// Whether the error was caused by the request rather than by the service.
    ///
    /// The API answers these with `400 Bad Request`.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Fetch(_) | Self::InvalidInput(_) | Self::EmptyKnowledgeBase(_)
        )
    }
}

impl From<reqwest::Error> for KbRagError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KbRagError>;
