//! Bundle configuration (`tendem-mcpb.toml`)
//!
//! Every key is optional. Relative paths are resolved against the directory
//! holding the config file, or the working directory when no file exists.
//!
//! ```toml
//! [manifest]
//! path = "mcpb/manifest.json"
//!
//! [server]
//! command = "uvx"
//! args = ["tendem-mcp"]
//! timeout_secs = 60
//!
//! [server.env]
//! TENDEM_DEBUG = "0"
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tendem_fs::{NormalizedPath, io};
use tendem_manifest::DEFAULT_MANIFEST_PATH;
use tendem_registry::StdioServerConfig;
use tendem_registry::stdio::{DEFAULT_ARGS, DEFAULT_COMMAND, DEFAULT_TIMEOUT};

use crate::error::{Error, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "tendem-mcpb.toml";

/// Parsed `tendem-mcpb.toml`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    pub manifest: ManifestSection,
    pub server: ServerSection,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    base: Option<NormalizedPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestSection {
    pub path: String,
}

impl Default for ManifestSection {
    fn default() -> Self {
        Self {
            path: DEFAULT_MANIFEST_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub command: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    pub env: BTreeMap<String, String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            args: DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            cwd: None,
            env: BTreeMap::new(),
        }
    }
}

impl BundleConfig {
    /// Locate and load the configuration.
    ///
    /// An `explicit` path must exist. Without one, `root/tendem-mcpb.toml`
    /// is used if present and defaults otherwise.
    pub fn discover(root: &NormalizedPath, explicit: Option<&NormalizedPath>) -> Result<Self> {
        if let Some(path) = explicit {
            let path = path.resolve_against(root);
            if !path.is_file() {
                return Err(Error::ConfigNotFound {
                    path: path.to_native(),
                });
            }
            return Self::load(&path);
        }

        let default_path = root.join(CONFIG_FILENAME);
        if default_path.is_file() {
            return Self::load(&default_path);
        }

        tracing::debug!(root = %root, "No config file, using defaults");
        Ok(Self {
            base: Some(root.clone()),
            ..Self::default()
        })
    }

    /// Load and validate the config at `path`.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let content = io::read_text(path).map_err(|source| Error::ConfigRead {
            path: path.to_native(),
            source,
        })?;
        let mut config = Self::parse(&content).map_err(|e| match e {
            Error::ConfigParse { message, .. } => Error::ConfigParse {
                path: path.to_native(),
                message,
            },
            other => other,
        })?;
        config.base = path.parent();
        tracing::debug!(path = %path, "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate config text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::ConfigParse {
            path: CONFIG_FILENAME.into(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.manifest.path.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "manifest.path must not be empty".into(),
            });
        }
        if self.server.command.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "server.command must not be empty".into(),
            });
        }
        if self.server.timeout_secs == 0 {
            return Err(Error::InvalidConfig {
                message: "server.timeout_secs must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Anchor relative paths at `base`.
    pub fn with_base(mut self, base: NormalizedPath) -> Self {
        self.base = Some(base);
        self
    }

    fn resolve(&self, path: &str) -> NormalizedPath {
        let path = NormalizedPath::new(path);
        match &self.base {
            Some(base) => path.resolve_against(base),
            None => path,
        }
    }

    /// Absolute (or base-relative) manifest location.
    pub fn manifest_path(&self) -> NormalizedPath {
        self.resolve(&self.manifest.path)
    }

    /// Launch settings for stdio discovery.
    pub fn server_config(&self) -> StdioServerConfig {
        StdioServerConfig {
            command: self.server.command.clone(),
            args: self.server.args.clone(),
            env: self.server.env.clone(),
            cwd: self.server.cwd.as_deref().map(|c| self.resolve(c).to_native()),
            timeout: Duration::from_secs(self.server.timeout_secs),
        }
    }
}
