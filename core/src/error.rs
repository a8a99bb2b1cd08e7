use thiserror::Error;

/// Structural problems in the serialized result of the `display_data` tool.
#[derive(Debug, Error)]
pub enum DisplayDataParseError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Expected an object")]
    NotAnObject,
    #[error("Missing \"data\" for single MIME payload")]
    MissingData,
    #[error("Expected \"data\" to be a MIME bundle object")]
    NotABundle,
    #[error("MIME bundle is empty")]
    EmptyBundle,
}

/// Failure of the agent call itself, as opposed to an `error` event
/// reported through the event stream.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config.toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
