//! Manifest synchronization
//!
//! - **sync**: mirror the registry into `tools` and write the manifest
//! - **check**: report drift without writing
//! - **stamp_version**: write a release tag into `version`

mod engine;
mod release;
mod report;

pub use engine::{SyncEngine, SyncOptions};
pub use release::stamp_version;
pub use report::{CheckReport, CheckStatus, SyncReport, VersionReport};
