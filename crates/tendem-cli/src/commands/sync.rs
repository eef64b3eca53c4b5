//! Sync and check command implementations
//!
//! Both compare the manifest's `tools` array with the registry; only sync
//! writes.

use colored::Colorize;
use tendem_core::{CheckReport, CheckStatus, SyncOptions, SyncReport};
use tendem_manifest::ToolChange;

use crate::context::BundleContext;
use crate::error::{CliError, Result};

/// Run the sync command
pub async fn run_sync(ctx: &BundleContext, dry_run: bool, json: bool) -> Result<()> {
    let engine = ctx.engine();
    if !json {
        println!(
            "{} Reading tools from {}...",
            "=>".blue().bold(),
            engine.source()
        );
    }

    let report = engine.sync(SyncOptions { dry_run }).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_sync_report(&report);
    }
    Ok(())
}

fn print_sync_report(report: &SyncReport) {
    if report.up_to_date {
        println!(
            "{} {} already declares all {} tools.",
            "OK".green().bold(),
            report.manifest.cyan(),
            report.tools.len()
        );
        return;
    }

    print_changes(&report.changes);

    if report.dry_run {
        println!(
            "{} Would rewrite {} with {} tools.",
            "DRY RUN".yellow().bold(),
            report.manifest.cyan(),
            report.tools.len()
        );
    } else {
        println!(
            "{} Wrote {} tools to {}.",
            "OK".green().bold(),
            report.tools.len(),
            report.manifest.cyan()
        );
    }
}

/// Run the check command
///
/// Drift is reported as an error so the process exits non-zero.
pub async fn run_check(ctx: &BundleContext, json: bool) -> Result<()> {
    let engine = ctx.engine();
    if !json {
        println!(
            "{} Checking {} against {}...",
            "=>".blue().bold(),
            engine.manifest_path().as_str().cyan(),
            engine.source()
        );
    }

    let report = engine.check().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_check_report(&report);
    }

    match report.status {
        CheckStatus::InSync => Ok(()),
        CheckStatus::Drifted => Err(CliError::Drifted {
            manifest: report.manifest,
        }),
    }
}

fn print_check_report(report: &CheckReport) {
    match report.status {
        CheckStatus::InSync => {
            println!("{} Manifest tools match the registry.", "OK".green().bold());
        }
        CheckStatus::Drifted => {
            println!("{} Manifest tools have drifted:", "DRIFTED".red().bold());
            if report.changes.is_empty() {
                println!("   {} formatting only", "!".red());
            }
            print_changes(&report.changes);
            println!();
            for line in report.diff.lines() {
                if line.starts_with("+++") || line.starts_with("---") {
                    println!("{}", line.bold());
                } else if line.starts_with('+') {
                    println!("{}", line.green());
                } else if line.starts_with('-') {
                    println!("{}", line.red());
                } else if line.starts_with("@@") {
                    println!("{}", line.cyan());
                } else {
                    println!("{}", line);
                }
            }
        }
    }
}

fn print_changes(changes: &[ToolChange]) {
    for change in changes {
        let marker = match change {
            ToolChange::Added { .. } => "+".green(),
            ToolChange::Removed { .. } => "-".red(),
            ToolChange::DescriptionChanged { .. } | ToolChange::Reordered => "~".yellow(),
        };
        println!("   {} {}", marker, change);
    }
}
