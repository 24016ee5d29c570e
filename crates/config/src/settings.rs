// Application settings
// Loaded from <base_dir>/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{SlotStore, Variant};

/// Workbook name used when neither settings nor the caller pick one
pub const DEFAULT_EXPORT_FILE: &str = "divisible_space.xlsx";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Grid
    #[serde(rename = "grid.defaultVariant")]
    pub default_variant: Variant,

    // Storage
    #[serde(rename = "storage.directory", skip_serializing_if = "Option::is_none")]
    pub storage_directory: Option<PathBuf>,

    // Export
    #[serde(rename = "export.fileName")]
    pub export_file_name: String,

    // Session
    #[serde(rename = "session.defaultName", skip_serializing_if = "Option::is_none")]
    pub default_session_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_variant: Variant::Enhanced,
            storage_directory: None,
            export_file_name: DEFAULT_EXPORT_FILE.to_string(),
            default_session_name: None,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        crate::base_dir().join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing or unreadable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                return Self::default();
            }
        };

        // Strip comments (lines starting with //)
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        match serde_json::from_str(&cleaned) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Slot store honoring `storage.directory`
    pub fn store(&self) -> SlotStore {
        match &self.storage_directory {
            Some(dir) => SlotStore::new(dir.clone()),
            None => SlotStore::default_location(),
        }
    }

    /// Session name to use when a saved space carries none
    pub fn fallback_session_name(&self) -> &str {
        self.default_session_name.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.export_file_name, "divisible_space.xlsx");
        assert_eq!(settings.fallback_session_name(), "");
    }

    #[test]
    fn test_parses_dotted_keys_and_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{
    // which editor opens by default
    "grid.defaultVariant": "minimal",
    "export.fileName": "hall.xlsx",
    "session.defaultName": "Front desk"
}"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.default_variant, Variant::Minimal);
        assert_eq!(settings.export_file_name, "hall.xlsx");
        assert_eq!(settings.fallback_session_name(), "Front desk");
        assert!(settings.storage_directory.is_none());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{\"grid.defaultVariant\": 7}").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            storage_directory: Some(dir.path().join("slots")),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded, settings);
        assert_eq!(loaded.store().dir(), dir.path().join("slots"));
    }
}
