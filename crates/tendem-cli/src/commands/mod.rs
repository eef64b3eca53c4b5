//! Command implementations for tendem-cli

pub mod client_config;
pub mod list;
pub mod sync;
pub mod version;

pub use client_config::run_client_config;
pub use list::run_list_tools;
pub use sync::{run_check, run_sync};
pub use version::run_set_version;
