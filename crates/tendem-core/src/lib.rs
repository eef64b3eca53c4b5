//! Manifest sync engine and bundle configuration for the Tendem MCP bundle
//!
//! This crate ties the manifest model to a tool registry:
//!
//! - **Configuration**: where the manifest lives and how to launch the server
//! - **SyncEngine**: sync, check and list operations over the `tools` array
//! - **Release stamping**: writing a release tag into `version`
//! - **Client snippets**: the JSON each MCP client needs to run the server
//!
//! ```text
//!                 tendem-cli
//!                     |
//!                tendem-core
//!                     |
//!     +---------------+----------------+
//!     |               |                |
//! tendem-fs   tendem-manifest   tendem-registry
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod sync;

pub use clients::{McpClient, ServerLaunch, client_config};
pub use config::{BundleConfig, CONFIG_FILENAME};
pub use error::{Error, FailureKind, Result};
pub use sync::{
    CheckReport, CheckStatus, SyncEngine, SyncOptions, SyncReport, VersionReport, stamp_version,
};
