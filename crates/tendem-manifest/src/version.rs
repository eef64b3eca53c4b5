//! Release tag parsing
//!
//! Release automation pushes tags such as `v1.4.0`; the manifest carries the
//! bare semantic version.

use crate::error::{Error, Result};

/// Parse a release tag into a semantic version.
///
/// Accepts `1.4.0`, `v1.4.0` and `refs/tags/v1.4.0`. Pre-release and build
/// metadata are kept (`v2.0.0-rc.1` becomes `2.0.0-rc.1`).
pub fn parse_release_tag(tag: &str) -> Result<semver::Version> {
    let trimmed = tag.trim();
    let bare = trimmed.strip_prefix("refs/tags/").unwrap_or(trimmed);
    let bare = bare
        .strip_prefix('v')
        .or_else(|| bare.strip_prefix('V'))
        .unwrap_or(bare);

    semver::Version::parse(bare).map_err(|source| Error::InvalidVersion {
        tag: tag.to_string(),
        source,
    })
}
