//! Error types for tendem-core

use std::path::PathBuf;

/// Result type for tendem-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// The two ways a release step can fail, plus bad configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server or its tool registry could not be found or read
    Discovery,
    /// The manifest is missing, malformed, or could not be written
    Manifest,
    /// The bundle configuration is missing or invalid
    Config,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Discovery => "discovery",
            Self::Manifest => "manifest",
            Self::Config => "config",
        })
    }
}

/// Errors that can occur in tendem-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An explicitly requested config file does not exist
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// The config file could not be read
    #[error("Failed to read configuration at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: tendem_fs::Error,
    },

    /// The config file is not valid TOML or has unknown keys
    #[error("Failed to parse configuration at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// The config parsed but a value is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unknown MCP client name
    #[error("Unknown MCP client '{name}' (expected one of: {expected})")]
    UnknownClient { name: String, expected: String },

    /// Manifest error from tendem-manifest
    #[error(transparent)]
    Manifest(#[from] tendem_manifest::Error),

    /// Discovery error from tendem-registry
    #[error(transparent)]
    Registry(#[from] tendem_registry::Error),

    /// Filesystem error from tendem-fs
    #[error(transparent)]
    Fs(#[from] tendem_fs::Error),
}

impl Error {
    /// Classify the failure for reporting.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Registry(_) => FailureKind::Discovery,
            Self::Manifest(_) | Self::Fs(_) => FailureKind::Manifest,
            Self::ConfigNotFound { .. }
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::InvalidConfig { .. }
            | Self::UnknownClient { .. } => FailureKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_are_discovery_failures() {
        let err = Error::from(tendem_registry::Error::DuplicateTool {
            name: "get_task".into(),
        });
        assert_eq!(err.kind(), FailureKind::Discovery);
        assert_eq!(err.kind().to_string(), "discovery");
        assert_eq!(err.to_string(), "tool registry lists 'get_task' more than once");
    }

    #[test]
    fn manifest_errors_are_manifest_failures() {
        let err = Error::from(tendem_manifest::Error::NotAnObject {
            path: PathBuf::from("mcpb/manifest.json"),
        });
        assert_eq!(err.kind(), FailureKind::Manifest);
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/path/to/tendem-mcpb.toml"),
        };
        assert_eq!(err.kind(), FailureKind::Config);
        assert!(err.to_string().contains("/path/to/tendem-mcpb.toml"));
    }
}
