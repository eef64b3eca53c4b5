//! Invocation context
//!
//! Resolves the configuration, manifest location and tool registry for one
//! run. Relative command-line paths are taken from the working directory.

use std::path::Path;

use tendem_core::{BundleConfig, SyncEngine};
use tendem_fs::NormalizedPath;
use tendem_registry::{StaticRegistry, StdioRegistry, ToolRegistry};

use crate::cli::Cli;
use crate::error::Result;

/// Everything a command needs to locate its inputs
#[derive(Debug, Clone)]
pub struct BundleContext {
    pub config: BundleConfig,
    pub manifest: NormalizedPath,
    pub registry_file: Option<NormalizedPath>,
}

impl BundleContext {
    /// Resolve flags over the config file over defaults.
    pub fn resolve(cwd: &Path, cli: &Cli) -> Result<Self> {
        let root = NormalizedPath::new(cwd);
        let explicit = cli.config.as_deref().map(NormalizedPath::new);
        let config = BundleConfig::discover(&root, explicit.as_ref())?;

        let manifest = match &cli.manifest {
            Some(path) => NormalizedPath::new(path).resolve_against(&root),
            None => config.manifest_path(),
        };
        let registry_file = cli
            .registry_file
            .as_deref()
            .map(|p| NormalizedPath::new(p).resolve_against(&root));

        tracing::debug!(manifest = %manifest, "Resolved bundle context");

        Ok(Self {
            config,
            manifest,
            registry_file,
        })
    }

    pub fn registry(&self) -> Box<dyn ToolRegistry> {
        match &self.registry_file {
            Some(path) => Box::new(StaticRegistry::new(path.clone())),
            None => Box::new(StdioRegistry::new(self.config.server_config())),
        }
    }

    pub fn engine(&self) -> SyncEngine {
        SyncEngine::new(self.manifest.clone(), self.registry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_point_at_bundle_manifest() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from(["tendem-mcpb"]);

        let ctx = BundleContext::resolve(dir.path(), &cli).unwrap();

        let root = NormalizedPath::new(dir.path());
        assert_eq!(ctx.manifest, root.join("mcpb/manifest.json"));
        assert!(ctx.registry_file.is_none());
        assert!(ctx.registry().source().contains("uvx tendem-mcp"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("tendem-mcpb.toml"),
            "[manifest]\npath = \"from-config.json\"\n",
        )
        .unwrap();

        let from_config =
            BundleContext::resolve(dir.path(), &Cli::parse_from(["tendem-mcpb"])).unwrap();
        assert!(from_config.manifest.as_str().ends_with("/from-config.json"));

        let cli = Cli::parse_from([
            "tendem-mcpb",
            "--manifest",
            "other/manifest.json",
            "--registry-file",
            "tools.json",
        ]);
        let ctx = BundleContext::resolve(dir.path(), &cli).unwrap();
        assert!(ctx.manifest.as_str().ends_with("/other/manifest.json"));
        assert!(ctx.registry().source().contains("tools.json"));
    }
}
