//! Durable key-value slots for saved spaces.
//!
//! Each slot is one JSON file, `<dir>/<key>.json`, overwritten wholesale on
//! every save. Writes go to a sibling `.tmp` file first and are renamed into
//! place, so a reader sees either the previous snapshot or the new one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use divspace_engine::state::{PersistedConfig, SpaceState};

use crate::error::StoreError;

/// Which editor a saved space belongs to. Each variant has its own slot so
/// the two never overwrite each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Details and reservations only
    Minimal,
    /// Details, reservations, color, tags and capacity
    #[default]
    Enhanced,
}

impl Variant {
    pub fn slot_key(&self) -> &'static str {
        match self {
            Variant::Minimal => "divisibleSpaceState",
            Variant::Enhanced => "enhancedDivisibleSpaceState",
        }
    }

    /// (rows, cols) used when nothing has been saved yet
    pub fn default_dimensions(&self) -> (usize, usize) {
        match self {
            Variant::Minimal => (3, 3),
            Variant::Enhanced => (32, 32),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "minimal" => Some(Variant::Minimal),
            "enhanced" => Some(Variant::Enhanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlotStore {
    dir: PathBuf,
}

impl SlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the configured base directory (see `crate::base_dir`)
    pub fn default_location() -> Self {
        Self::new(crate::base_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Serialize `value` into slot `key`, replacing whatever was there.
    pub fn write_slot<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::Io(format!("cannot create {}: {e}", self.dir.display())))?;

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        let path = self.slot_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, json)
            .map_err(|e| StoreError::Io(format!("cannot write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .map_err(|e| StoreError::Io(format!("cannot replace {}: {e}", path.display())))?;

        log::debug!("wrote slot {key} to {}", path.display());
        Ok(())
    }

    /// Read slot `key`. `Ok(None)` when the slot has never been written.
    pub fn read_slot<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.slot_path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io(format!("cannot read {}: {e}", path.display())))
            }
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| StoreError::Malformed(format!("{}: {e}", path.display())))
    }

    /// Save a space configuration to the variant's slot.
    pub fn save(&self, variant: Variant, config: &PersistedConfig) -> Result<(), StoreError> {
        self.write_slot(variant.slot_key(), config)?;
        log::info!(
            "saved {}x{} space ({} cells) to slot {}",
            config.rows,
            config.cols,
            config.squares.len(),
            variant.slot_key()
        );
        Ok(())
    }

    /// Load a space configuration, reporting why it could not be used.
    ///
    /// Data that parses but breaks the grid invariants is `Malformed` too.
    pub fn try_load(&self, variant: Variant) -> Result<Option<PersistedConfig>, StoreError> {
        let Some(config) = self.read_slot::<PersistedConfig>(variant.slot_key())? else {
            return Ok(None);
        };
        SpaceState::from_persisted(config.clone())
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(Some(config))
    }

    /// Load a space configuration. Absent or unusable slots yield `None`.
    pub fn load(&self, variant: Variant) -> Option<PersistedConfig> {
        match self.try_load(variant) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring saved space in slot {}: {e}", variant.slot_key());
                None
            }
        }
    }

    /// Load the saved snapshot, or a defaulted one for the variant.
    pub fn load_state(&self, variant: Variant) -> SpaceState {
        self.load(variant)
            .and_then(|config| SpaceState::from_persisted(config).ok())
            .unwrap_or_else(|| {
                let (rows, cols) = variant.default_dimensions();
                SpaceState::new(rows, cols)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use divspace_engine::cell::FieldUpdate;
    use divspace_engine::state::Operation;
    use tempfile::tempdir;

    fn sample_state() -> SpaceState {
        SpaceState::new(2, 2)
            .apply(Operation::SetSessionName("Alice".to_string()))
            .unwrap()
            .apply(Operation::ToggleReservation { id: 1 })
            .unwrap()
            .apply(Operation::SetField {
                id: 2,
                update: FieldUpdate::Tags("vip, window".to_string()),
            })
            .unwrap()
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        let config = sample_state().to_persisted();

        store.save(Variant::Enhanced, &config).unwrap();
        assert_eq!(store.load(Variant::Enhanced), Some(config));
        assert!(!dir.path().join("enhancedDivisibleSpaceState.json.tmp").exists());
    }

    #[test]
    fn test_variants_do_not_collide() {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        store.save(Variant::Minimal, &SpaceState::new(1, 1).to_persisted()).unwrap();

        assert!(store.load(Variant::Enhanced).is_none());
        assert_eq!(store.load(Variant::Minimal).unwrap().squares.len(), 1);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        store.save(Variant::Enhanced, &sample_state().to_persisted()).unwrap();
        let replacement = SpaceState::new(1, 3).to_persisted();
        store.save(Variant::Enhanced, &replacement).unwrap();
        assert_eq!(store.load(Variant::Enhanced), Some(replacement));
    }

    #[test]
    fn test_absent_slot_defaults() {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path().join("never-created"));
        assert!(matches!(store.try_load(Variant::Minimal), Ok(None)));

        let state = store.load_state(Variant::Minimal);
        assert_eq!((state.grid.rows(), state.grid.cols()), (3, 3));
        assert!(state.session_name.is_empty());

        let state = store.load_state(Variant::Enhanced);
        assert_eq!(state.grid.len(), 32 * 32);
    }

    #[test]
    fn test_malformed_json_degrades_to_default() {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        fs::write(store.slot_path(Variant::Minimal.slot_key()), "{not json").unwrap();

        assert!(matches!(store.try_load(Variant::Minimal), Err(StoreError::Malformed(_))));
        assert!(store.load(Variant::Minimal).is_none());
        assert_eq!(store.load_state(Variant::Minimal), SpaceState::new(3, 3));
    }

    #[test]
    fn test_inconsistent_grid_is_malformed() {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        let json = r#"{"rows":2,"cols":2,"squares":[{"id":0}],"name":"x"}"#;
        fs::write(store.slot_path(Variant::Enhanced.slot_key()), json).unwrap();

        assert!(matches!(store.try_load(Variant::Enhanced), Err(StoreError::Malformed(_))));
        assert_eq!(store.load_state(Variant::Enhanced).grid.len(), 32 * 32);
    }

    #[test]
    fn test_minimal_shape_loads_with_defaults() {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        let json = r#"{"rows":1,"cols":2,"squares":[
            {"id":0,"details":"a","reserved":false,"reservedBy":""},
            {"id":1,"details":"","reserved":true,"reservedBy":"Bob"}
        ]}"#;
        fs::write(store.slot_path(Variant::Minimal.slot_key()), json).unwrap();

        let state = store.load_state(Variant::Minimal);
        assert_eq!(state.grid.len(), 2);
        assert_eq!(state.grid.cell(1).unwrap().reserved_by, "Bob");
        assert_eq!(state.grid.cell(0).unwrap().capacity, 1);
        assert!(state.session_name.is_empty());
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::from_name("Minimal"), Some(Variant::Minimal));
        assert_eq!(Variant::from_name("enhanced"), Some(Variant::Enhanced));
        assert_eq!(Variant::from_name("fancy"), None);
        assert_eq!(Variant::default(), Variant::Enhanced);
    }
}
