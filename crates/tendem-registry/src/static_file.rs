//! Static registry file
//!
//! Accepts either `{"tools": [...]}` or a bare array of tool objects, each
//! with a `name` and an optional `description`. Extra fields such as
//! `inputSchema` are ignored, so a saved `tools/list` result works as is.

use async_trait::async_trait;
use serde_json::Value;
use tendem_fs::{NormalizedPath, io};
use tendem_manifest::ToolEntry;

use crate::error::{Error, Result};
use crate::protocol::ListedTool;
use crate::registry::{ToolRegistry, validate_tools};

/// Tool registry backed by a JSON file
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    path: NormalizedPath,
}

impl StaticRegistry {
    pub fn new(path: impl Into<NormalizedPath>) -> Self {
        Self { path: path.into() }
    }

    fn parse(&self, content: &str) -> Result<Vec<ToolEntry>> {
        let invalid = |reason: String| Error::InvalidRegistryFile {
            path: self.path.to_native(),
            reason,
        };

        let value: Value = serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(mut obj) => match obj.remove("tools") {
                Some(Value::Array(entries)) => entries,
                _ => return Err(invalid("expected a 'tools' array".into())),
            },
            _ => return Err(invalid("expected an object or an array".into())),
        };

        let tools = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value::<ListedTool>(entry)
                    .map(ToolEntry::from)
                    .map_err(|e| invalid(format!("tool {index}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        validate_tools(tools)
    }
}

#[async_trait]
impl ToolRegistry for StaticRegistry {
    fn source(&self) -> String {
        format!("registry file {}", self.path)
    }

    async fn list_tools(&self) -> Result<Vec<ToolEntry>> {
        let content = io::read_text(&self.path)?;
        let tools = self.parse(&content)?;
        tracing::debug!(path = %self.path, count = tools.len(), "Loaded static tool registry");
        Ok(tools)
    }
}
