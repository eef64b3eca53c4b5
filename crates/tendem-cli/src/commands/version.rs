//! Set-version command implementation

use colored::Colorize;
use tendem_core::stamp_version;

use crate::context::BundleContext;
use crate::error::Result;

/// Run the set-version command
pub fn run_set_version(ctx: &BundleContext, tag: &str, dry_run: bool) -> Result<()> {
    let report = stamp_version(&ctx.manifest, tag, dry_run)?;

    let unchanged = report.previous == report.version;
    if dry_run && !unchanged {
        println!(
            "{} Would set version {} -> {} in {}.",
            "DRY RUN".yellow().bold(),
            report.previous.dimmed(),
            report.version.green(),
            report.manifest.cyan()
        );
    } else if !report.written {
        println!(
            "{} {} is already at version {}.",
            "OK".green().bold(),
            report.manifest.cyan(),
            report.version
        );
    } else if unchanged {
        println!(
            "{} Rewrote {} at version {}.",
            "OK".green().bold(),
            report.manifest.cyan(),
            report.version
        );
    } else {
        println!(
            "{} Version {} -> {} in {}.",
            "OK".green().bold(),
            report.previous.dimmed(),
            report.version.green(),
            report.manifest.cyan()
        );
    }
    Ok(())
}
