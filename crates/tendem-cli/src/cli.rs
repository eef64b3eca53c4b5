//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keep the Tendem MCP bundle manifest in step with the server's tools
///
/// Without a subcommand, runs `sync`.
#[derive(Parser, Debug)]
#[command(name = "tendem-mcpb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Manifest to operate on (default: mcpb/manifest.json)
    #[arg(long, global = true, env = "TENDEM_MCPB_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Configuration file (default: ./tendem-mcpb.toml when present)
    #[arg(long, global = true, env = "TENDEM_MCPB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read tools from a JSON file instead of starting the server
    #[arg(long, global = true, value_name = "PATH")]
    pub registry_file: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Rewrite the manifest's tools from the server's registry
    Sync {
        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },

    /// Fail if the manifest's tools are out of date
    ///
    /// Exits with status 1 and prints a diff when a sync would change the
    /// manifest. Nothing is written.
    Check {
        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },

    /// Write a release tag into the manifest's version
    ///
    /// Examples:
    ///   tendem-mcpb set-version v1.4.0
    ///   tendem-mcpb set-version refs/tags/v1.4.0
    SetVersion {
        /// Release tag or version
        tag: String,

        /// Show the new version without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// List the tools the server registers
    ListTools {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the config snippet registering the server with an MCP client
    ///
    /// Clients: claude-desktop, claude-code, cursor, windsurf, vscode, zed,
    /// gemini.
    ClientConfig {
        /// Client name
        client: String,

        /// API key to embed instead of a placeholder
        #[arg(long)]
        api_key: Option<String>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Sync {
            dry_run: false,
            json: false,
        }
    }
}
