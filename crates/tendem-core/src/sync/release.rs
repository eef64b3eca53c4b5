//! Release version stamping

use tendem_fs::{NormalizedPath, compute_content_checksum};
use tendem_manifest::{ManifestDocument, parse_release_tag};

use super::report::VersionReport;
use crate::Result;

/// Write the version from a release tag (`v1.4.0`) into the manifest.
///
/// The tag is validated before the manifest is touched. Only `version`
/// changes; nothing is written when it already matches or `dry_run` is set.
pub fn stamp_version(manifest_path: &NormalizedPath, tag: &str, dry_run: bool) -> Result<VersionReport> {
    let version = parse_release_tag(tag)?;
    let mut doc = ManifestDocument::load(manifest_path)?;
    let previous = doc.version().to_string();

    doc.set_version(&version);
    let rendered = doc.render()?;
    let modified = rendered != doc.original();

    let written = if modified && !dry_run {
        doc.save()?;
        true
    } else {
        false
    };

    tracing::info!(
        manifest = %manifest_path,
        previous = %previous,
        version = %version,
        written,
        "Stamped manifest version"
    );

    Ok(VersionReport {
        manifest: manifest_path.to_string(),
        previous,
        version: version.to_string(),
        written,
        checksum: compute_content_checksum(&rendered),
    })
}
