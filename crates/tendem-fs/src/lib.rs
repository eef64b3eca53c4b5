//! Filesystem helpers for the Tendem MCP bundle tooling
//!
//! Provides normalized path handling, checksums and atomic writes so that
//! manifest rewrites never leave a half-written file behind.

pub mod checksum;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::compute_content_checksum;
pub use error::{Error, Result};
pub use path::NormalizedPath;
