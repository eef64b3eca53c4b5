//! Client-config command implementation
//!
//! The snippet goes to stdout so it can be redirected; hints go to stderr.

use colored::Colorize;
use tendem_core::{McpClient, ServerLaunch, client_config};

use crate::error::Result;

/// Print the snippet registering the server with `client`
pub fn run_client_config(client: &str, api_key: Option<&str>) -> Result<()> {
    let client: McpClient = client.parse()?;
    let snippet = client_config(client, &ServerLaunch::published(api_key));

    eprintln!(
        "{} {} config: {}",
        "=>".blue().bold(),
        client.display_name(),
        client.config_location()
    );
    if api_key.is_none() {
        eprintln!(
            "   {} replace the placeholder with your Tendem API key",
            "!".yellow()
        );
    }

    println!("{}", serde_json::to_string_pretty(&snippet)?);
    Ok(())
}
