//! Desktop-extension manifest model for the Tendem MCP bundle
//!
//! The bundle packer consumes `mcpb/manifest.json`. This crate loads that
//! document, validates the fields the packer relies on, and exposes the two
//! edits the release pipeline makes: replacing the `tools` array and stamping
//! the `version`. Every other field is carried through untouched, in its
//! original key order.
//!
//! # Example
//!
//! ```no_run
//! use tendem_manifest::{ManifestDocument, ToolEntry};
//! use tendem_fs::NormalizedPath;
//!
//! let mut doc = ManifestDocument::load(&NormalizedPath::new("mcpb/manifest.json"))?;
//! doc.set_tools(&[ToolEntry::new("list_tasks", "List all Tendem tasks")]);
//! if doc.is_modified()? {
//!     doc.save()?;
//! }
//! # Ok::<(), tendem_manifest::Error>(())
//! ```

pub mod document;
pub mod error;
pub mod tool;
pub mod version;

pub use document::ManifestDocument;
pub use error::{Error, Result};
pub use tool::{ToolChange, ToolEntry, diff_tools};
pub use version::parse_release_tag;

/// Location of the manifest relative to the repository root.
pub const DEFAULT_MANIFEST_PATH: &str = "mcpb/manifest.json";

/// Key holding the declared tool list.
pub const TOOLS_KEY: &str = "tools";

/// Key holding the extension version.
pub const VERSION_KEY: &str = "version";
