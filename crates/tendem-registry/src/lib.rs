//! Tool registry discovery for the Tendem MCP server
//!
//! The tools a bundle declares must match what the published server
//! registers. The server is a separate package in another runtime, so the
//! registry is read the way any MCP host reads it:
//!
//! ```text
//! [ tendem-mcpb ] --initialize / tools/list (JSON-RPC over stdio)--> [ uvx tendem-mcp ]
//! ```
//!
//! [`StaticRegistry`] reads a pre-exported tool list instead, for offline
//! builds.

pub mod error;
pub mod protocol;
pub mod registry;
pub mod static_file;
pub mod stdio;

pub use error::{Error, Result};
pub use registry::{ToolRegistry, validate_tools};
pub use static_file::StaticRegistry;
pub use stdio::{StdioRegistry, StdioServerConfig};
