//! List-tools command implementation

use colored::Colorize;

use crate::context::BundleContext;
use crate::error::Result;

/// Print the registry's tools without touching the manifest
pub async fn run_list_tools(ctx: &BundleContext, json: bool) -> Result<()> {
    let engine = ctx.engine();
    let tools = engine.list_tools().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    println!("{} ({})", "Registered Tools".bold(), engine.source().dimmed());
    println!();

    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for tool in &tools {
        let name = format!("{:<width$}", tool.name, width = width);
        println!("  {}  {}", name.cyan(), tool.description.dimmed());
    }

    println!();
    println!("{} {} tools registered", "Total:".bold(), tools.len());
    Ok(())
}
