//! Error types for tendem-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tendem-core
    #[error(transparent)]
    Core(#[from] tendem_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output could not be rendered
    #[error("Failed to render JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// `check` found the committed manifest out of date
    #[error("{manifest} is out of date with the tool registry; run `tendem-mcpb sync`")]
    Drifted { manifest: String },
}

impl CliError {
    /// Which stage failed, when the error came from the sync pipeline.
    pub fn failure_kind(&self) -> Option<tendem_core::FailureKind> {
        match self {
            Self::Core(e) => Some(e.kind()),
            _ => None,
        }
    }
}
