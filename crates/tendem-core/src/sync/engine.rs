//! The sync engine

use similar::TextDiff;
use tendem_fs::{NormalizedPath, compute_content_checksum};
use tendem_manifest::{ManifestDocument, ToolEntry, diff_tools};
use tendem_registry::ToolRegistry;

use super::report::{CheckReport, CheckStatus, SyncReport};
use crate::Result;

/// Options for sync operations
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Compute the result without touching the file
    pub dry_run: bool,
}

/// Engine mirroring a tool registry into a manifest
///
/// The manifest is loaded and validated before the registry is queried, so
/// a missing or malformed manifest fails without starting the server. The
/// file is written only after discovery succeeded, in one atomic rename.
pub struct SyncEngine {
    manifest_path: NormalizedPath,
    registry: Box<dyn ToolRegistry>,
}

/// Manifest before and after applying the registry
struct Plan {
    doc: ManifestDocument,
    tools: Vec<ToolEntry>,
    changes: Vec<tendem_manifest::ToolChange>,
    rendered: String,
}

impl SyncEngine {
    pub fn new(manifest_path: NormalizedPath, registry: Box<dyn ToolRegistry>) -> Self {
        Self {
            manifest_path,
            registry,
        }
    }

    pub fn manifest_path(&self) -> &NormalizedPath {
        &self.manifest_path
    }

    /// Describe where tools come from.
    pub fn source(&self) -> String {
        self.registry.source()
    }

    /// Enumerate the registry without touching the manifest.
    pub async fn list_tools(&self) -> Result<Vec<ToolEntry>> {
        Ok(self.registry.list_tools().await?)
    }

    async fn plan(&self) -> Result<Plan> {
        let mut doc = ManifestDocument::load(&self.manifest_path)?;
        let current = doc.tools()?;

        tracing::debug!(
            extension = %doc.name(),
            source = %self.registry.source(),
            "Listing registry tools"
        );
        let tools = self.registry.list_tools().await?;

        let changes = diff_tools(&current, &tools);
        doc.set_tools(&tools);
        let rendered = doc.render()?;

        Ok(Plan {
            doc,
            tools,
            changes,
            rendered,
        })
    }

    /// Mirror the registry into the manifest's `tools` array.
    pub async fn sync(&self, options: SyncOptions) -> Result<SyncReport> {
        let Plan {
            mut doc,
            tools,
            changes,
            rendered,
        } = self.plan().await?;

        let up_to_date = rendered == doc.original();
        let written = if !up_to_date && !options.dry_run {
            doc.save()?;
            true
        } else {
            false
        };

        tracing::info!(
            manifest = %self.manifest_path,
            tools = tools.len(),
            changes = changes.len(),
            written,
            "Manifest tools synchronized"
        );

        Ok(SyncReport {
            manifest: self.manifest_path.to_string(),
            source: self.registry.source(),
            tools: tools.into_iter().map(|t| t.name).collect(),
            changes,
            up_to_date,
            written,
            dry_run: options.dry_run,
            checksum: compute_content_checksum(&rendered),
        })
    }

    /// Report whether a sync would change the manifest.
    pub async fn check(&self) -> Result<CheckReport> {
        let plan = self.plan().await?;
        let original = plan.doc.original();

        let (status, diff) = if plan.rendered == original {
            (CheckStatus::InSync, String::new())
        } else {
            let label = self.manifest_path.to_string();
            let diff = TextDiff::from_lines(original, plan.rendered.as_str())
                .unified_diff()
                .context_radius(3)
                .header(&label, &label)
                .to_string();
            (CheckStatus::Drifted, diff)
        };

        Ok(CheckReport {
            manifest: self.manifest_path.to_string(),
            source: self.registry.source(),
            status,
            changes: plan.changes,
            diff,
        })
    }
}
