//! Error types for tool discovery

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering the server's tools
#[derive(Debug, Error)]
pub enum Error {
    /// The server command could not be started
    #[error("failed to start MCP server '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The server closed its output before answering
    #[error("MCP server '{command}' exited before answering {method}{}", format_stderr(.stderr))]
    ServerExited {
        command: String,
        method: String,
        stderr: String,
    },

    /// The server answered with a JSON-RPC error
    #[error("MCP server returned error {code} for {method}: {message}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    /// The server's answer did not follow the protocol
    #[error("protocol error during {method}: {message}")]
    Protocol { method: String, message: String },

    /// Discovery did not finish in time
    #[error("MCP server '{command}' did not list its tools within {secs}s")]
    Timeout { command: String, secs: u64 },

    /// Two tools share a name
    #[error("tool registry lists '{name}' more than once")]
    DuplicateTool { name: String },

    /// A tool has an empty name
    #[error("tool registry entry {index} has an empty name")]
    EmptyToolName { index: usize },

    /// A static registry file has the wrong shape
    #[error("invalid registry file {path}: {reason}")]
    InvalidRegistryFile { path: PathBuf, reason: String },

    /// Filesystem error from tendem-fs
    #[error(transparent)]
    Fs(#[from] tendem_fs::Error),

    /// IO error talking to the child process
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_stderr(stderr: &str) -> String {
    if stderr.trim().is_empty() {
        String::new()
    } else {
        format!("; stderr:\n{}", stderr.trim_end())
    }
}
