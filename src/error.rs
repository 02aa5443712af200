//! Error types for the post-media-dl application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Page fetch errors
    #[error("Could not fetch URL {url}: {reason}")]
    Fetch { url: String, reason: String },

    // Embedded payload errors
    #[error("Could not extract post data: no script assigns window._sharedData")]
    PayloadNotFound,

    #[error("Could not extract post data: embedded payload is not valid JSON ({0})")]
    PayloadParse(#[source] serde_json::Error),

    #[error("Could not extract post data: {0}")]
    PayloadShape(String),

    // Media errors
    #[error("No media found in post {0}")]
    NoMedia(String),

    // Per-item download errors
    #[error("Download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Whether this error came out of the embedded payload extraction stage.
    pub fn is_extraction_error(&self) -> bool {
        matches!(
            self,
            Error::PayloadNotFound | Error::PayloadParse(_) | Error::PayloadShape(_)
        )
    }

    /// Build a per-item download error.
    pub fn download(url: impl Into<String>, reason: impl ToString) -> Self {
        Error::Download {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes, one per terminal pipeline state.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 1;
    pub const FETCH_ERROR: i32 = 2;
    pub const EXTRACT_ERROR: i32 = 3;
    pub const NO_MEDIA: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
