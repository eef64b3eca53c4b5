//! Tendem MCP bundle CLI
//!
//! Keeps `mcpb/manifest.json` in step with the tools the published server
//! registers, and prints client configuration snippets.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use context::BundleContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        match e.failure_kind() {
            Some(kind) => eprintln!("{} ({}): {}", "error".red().bold(), kind, e),
            None => eprintln!("{}: {}", "error".red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.clone().unwrap_or_default();

    // Needs no manifest or registry
    if let Commands::ClientConfig { client, api_key } = &command {
        return commands::run_client_config(client, api_key.as_deref());
    }

    let cwd = std::env::current_dir()?;
    let ctx = BundleContext::resolve(&cwd, &cli)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute_command(&ctx, command))
}

/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(verbose: bool) {
    if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .try_init();
    }
}

async fn execute_command(ctx: &BundleContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync { dry_run, json } => commands::run_sync(ctx, dry_run, json).await,
        Commands::Check { json } => commands::run_check(ctx, json).await,
        Commands::SetVersion { tag, dry_run } => commands::run_set_version(ctx, &tag, dry_run),
        Commands::ListTools { json } => commands::run_list_tools(ctx, json).await,
        Commands::ClientConfig { client, api_key } => {
            commands::run_client_config(&client, api_key.as_deref())
        }
    }
}
