//! Reports returned by sync operations

use serde::{Deserialize, Serialize};
use tendem_manifest::ToolChange;

/// Outcome of a sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Manifest location
    pub manifest: String,
    /// Where the tool list came from
    pub source: String,
    /// Tool names now declared, in registry order
    pub tools: Vec<String>,
    /// Differences from the previous tool list
    pub changes: Vec<ToolChange>,
    /// Whether the file already matched byte for byte
    pub up_to_date: bool,
    /// Whether the file was rewritten
    pub written: bool,
    pub dry_run: bool,
    /// Checksum of the manifest content after the run
    pub checksum: String,
}

/// Whether the committed manifest matches the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// A sync would not change a byte
    InSync,
    /// A sync would rewrite the manifest
    Drifted,
}

/// Outcome of a check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub manifest: String,
    pub source: String,
    pub status: CheckStatus,
    /// Tool-level differences; may be empty when only formatting drifted
    pub changes: Vec<ToolChange>,
    /// Unified diff of the manifest text, empty when in sync
    pub diff: String,
}

impl CheckReport {
    pub fn is_in_sync(&self) -> bool {
        self.status == CheckStatus::InSync
    }
}

/// Outcome of stamping a release version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionReport {
    pub manifest: String,
    pub previous: String,
    pub version: String,
    pub written: bool,
    pub checksum: String,
}
