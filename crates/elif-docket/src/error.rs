use thiserror::Error;

/// Result type for docket operations
pub type DocketResult<T> = Result<T, DocketError>;

/// Errors that can occur while building or serving dockets
#[derive(Debug, Error)]
pub enum DocketError {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error (config files, listener binding)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path pattern could not be compiled
    #[error("Invalid path pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two dockets were registered under the same name
    #[error("Docket '{0}' is already registered")]
    DuplicateDocket(String),

    /// A request handler uses a method that cannot be documented
    #[error("Unsupported HTTP method '{method}' for path '{path}'")]
    UnsupportedMethod { method: String, path: String },

    /// Two request handlers describe the same method and path
    #[error("Operation {method} {path} is declared by more than one handler")]
    DuplicateOperation { method: String, path: String },

    /// Generic error with context
    #[error("Docket error: {0}")]
    Generic(String),
}

impl DocketError {
    /// Create a new configuration error
    pub fn config_error<T: ToString>(msg: T) -> Self {
        Self::Config(msg.to_string())
    }

    /// Create a new pattern compilation error
    pub fn pattern_error<P: ToString, M: ToString>(pattern: P, msg: M) -> Self {
        Self::Pattern {
            pattern: pattern.to_string(),
            message: msg.to_string(),
        }
    }

    /// Create a generic error
    pub fn generic<T: ToString>(msg: T) -> Self {
        Self::Generic(msg.to_string())
    }
}
