//! SHA-256 checksum utilities
//!
//! Checksums use the canonical `sha256:<hex>` form and are reported after
//! every manifest write so release logs can be compared across runs.

use sha2::{Digest, Sha256};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
pub fn compute_content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_checksum_has_prefix() {
        let sum = compute_content_checksum("{}\n");
        assert!(sum.starts_with("sha256:"));
        assert_eq!(sum.len(), PREFIX.len() + 64);
    }

    #[test]
    fn content_checksum_is_stable() {
        assert_eq!(
            compute_content_checksum("manifest"),
            compute_content_checksum("manifest")
        );
        assert_ne!(
            compute_content_checksum("manifest"),
            compute_content_checksum("manifest\n")
        );
    }
}
