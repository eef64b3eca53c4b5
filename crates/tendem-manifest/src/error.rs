//! Error types for tendem-manifest

use std::path::PathBuf;

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, editing or saving a manifest
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem error from tendem-fs
    #[error(transparent)]
    Fs(#[from] tendem_fs::Error),

    /// The manifest is not valid JSON
    #[error("Manifest at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest root is not a JSON object
    #[error("Manifest at {path} must be a JSON object")]
    NotAnObject { path: PathBuf },

    /// A required field is missing or has the wrong type
    #[error("Manifest at {path}: field '{field}' must be {expected}")]
    InvalidField {
        path: PathBuf,
        field: String,
        expected: &'static str,
    },

    /// An entry of the `tools` array is malformed
    #[error("Manifest at {path}: tools[{index}] {reason}")]
    InvalidToolEntry {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    /// A release tag is not a semantic version
    #[error("Invalid release tag '{tag}': {source}")]
    InvalidVersion {
        tag: String,
        #[source]
        source: semver::Error,
    },

    /// Serializing the manifest back to JSON failed
    #[error("Failed to render manifest: {0}")]
    Render(#[source] serde_json::Error),
}
