// Configuration loading: saved spaces, settings, projects

pub mod error;
pub mod projects;
pub mod settings;
pub mod store;

pub use error::StoreError;
pub use projects::{Project, ProjectRegistry, ProjectStatus};
pub use settings::Settings;
pub use store::{SlotStore, Variant};

use std::path::PathBuf;

/// Environment variable overriding the base directory
pub const HOME_ENV: &str = "DIVSPACE_HOME";

/// Base directory for settings, saved spaces and the project list.
///
/// `$DIVSPACE_HOME` if set, else `<config_dir>/divspace`.
pub fn base_dir() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(home);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("divspace")
}
