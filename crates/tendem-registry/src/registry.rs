//! The tool registry abstraction

use std::collections::HashSet;

use async_trait::async_trait;
use tendem_manifest::ToolEntry;

use crate::error::{Error, Result};

/// A source of truth for the tools the server exposes.
///
/// Implementations return tools in the server's enumeration order; the
/// manifest mirrors that order.
#[async_trait]
pub trait ToolRegistry: Send + Sync {
    /// Short human-readable description of where tools come from.
    fn source(&self) -> String;

    /// Enumerate the registered tools.
    async fn list_tools(&self) -> Result<Vec<ToolEntry>>;
}

/// Reject listings the manifest cannot mirror faithfully: empty names and
/// names that appear twice.
pub fn validate_tools(tools: Vec<ToolEntry>) -> Result<Vec<ToolEntry>> {
    let mut seen = HashSet::new();
    for (index, tool) in tools.iter().enumerate() {
        if tool.name.trim().is_empty() {
            return Err(Error::EmptyToolName { index });
        }
        if !seen.insert(tool.name.as_str()) {
            return Err(Error::DuplicateTool {
                name: tool.name.clone(),
            });
        }
    }
    Ok(tools)
}
