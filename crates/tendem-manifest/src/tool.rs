//! Tool entries and tool-list comparison

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// A tool declared in the manifest: the `{name, description}` pair the
/// packer shows to the host before the server is ever started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ToolEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A single difference between the declared and the discovered tool lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolChange {
    /// Present in the registry, absent from the manifest
    Added { name: String },
    /// Present in the manifest, absent from the registry
    Removed { name: String },
    /// Same name, different description
    DescriptionChanged { name: String },
    /// Same tools, different order
    Reordered,
}

impl std::fmt::Display for ToolChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added { name } => write!(f, "add tool '{}'", name),
            Self::Removed { name } => write!(f, "remove tool '{}'", name),
            Self::DescriptionChanged { name } => write!(f, "update description of '{}'", name),
            Self::Reordered => write!(f, "reorder tools to match registry"),
        }
    }
}

/// Compare the tools currently declared (`current`) with the ones the
/// registry reports (`desired`).
///
/// Changes are listed in `desired` order, then removals in `current` order.
/// `Reordered` is reported only when the shared tools appear in a different
/// relative order.
pub fn diff_tools(current: &[ToolEntry], desired: &[ToolEntry]) -> Vec<ToolChange> {
    let current_by_name: HashMap<&str, &ToolEntry> =
        current.iter().map(|t| (t.name.as_str(), t)).collect();
    let desired_names: HashSet<&str> = desired.iter().map(|t| t.name.as_str()).collect();

    let mut changes = Vec::new();

    for tool in desired {
        match current_by_name.get(tool.name.as_str()) {
            None => changes.push(ToolChange::Added {
                name: tool.name.clone(),
            }),
            Some(existing) if existing.description != tool.description => {
                changes.push(ToolChange::DescriptionChanged {
                    name: tool.name.clone(),
                })
            }
            Some(_) => {}
        }
    }

    for tool in current {
        if !desired_names.contains(tool.name.as_str()) {
            changes.push(ToolChange::Removed {
                name: tool.name.clone(),
            });
        }
    }

    let shared_current: Vec<&str> = current
        .iter()
        .map(|t| t.name.as_str())
        .filter(|n| desired_names.contains(n))
        .collect();
    let shared_desired: Vec<&str> = desired
        .iter()
        .map(|t| t.name.as_str())
        .filter(|n| current_by_name.contains_key(n))
        .collect();
    if shared_current != shared_desired {
        changes.push(ToolChange::Reordered);
    }

    changes
}
