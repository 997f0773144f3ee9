//! Unit profiles and their persistence rules.
//!
//! A unit is one remote GPS tracker: a unique name, the SIM phone number the
//! tracker answers on, the SMS password programmed into it, and its device
//! family (which selects the command catalog). Profiles are stored as one
//! JSON list under a fixed key; every write replaces the whole list.

use serde::{Deserialize, Serialize};

use crate::catalog::DEVICES;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key for the persisted unit list.
pub const UNIT_STORAGE_KEY: &str = "units";

/// Name of the placeholder unit shown when nothing has been saved yet.
/// This sentinel is never persisted; it only exists as a read-time fallback.
pub const DEFAULT_UNIT_NAME: &str = "○○○";

/// A saved tracker profile. `name` is the unique key within the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub device: String,
}

impl Unit {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            password: String::new(),
            device: device.into(),
        }
    }

    /// The non-persisted placeholder returned when no stored unit matches.
    pub fn placeholder() -> Self {
        Self::new(DEFAULT_UNIT_NAME, "", DEVICES[0])
    }

    /// True when this is the read-time fallback rather than a saved profile.
    pub fn is_placeholder(&self) -> bool {
        self.name == DEFAULT_UNIT_NAME
    }
}

/// CRUD over the persisted unit collection.
pub struct UnitStore<S> {
    store: S,
}

impl<S: KeyValueStore> UnitStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All persisted units, or a single placeholder when none exist. Never
    /// returns an empty list.
    pub fn list_units(&self) -> Vec<Unit> {
        let units: Vec<Unit> = self.store.get_list(UNIT_STORAGE_KEY);
        if units.is_empty() {
            vec![Unit::placeholder()]
        } else {
            units
        }
    }

    /// The persisted unit with exactly this name, or the placeholder when no
    /// unit matches (including when nothing is stored at all).
    pub fn get_unit(&self, name: &str) -> Unit {
        self.list_units()
            .into_iter()
            .find(|u| u.name == name)
            .unwrap_or_else(Unit::placeholder)
    }

    /// Insert `unit`, or overwrite the phone number, password and device of
    /// the existing unit with the same name. Collection order is preserved;
    /// new units are appended. The full list is re-persisted wholesale.
    pub fn add_or_edit(&self, unit: &Unit) -> Result<(), StorageError> {
        let mut units: Vec<Unit> = self.store.get_list(UNIT_STORAGE_KEY);
        match units.iter_mut().find(|u| u.name == unit.name) {
            Some(existing) => {
                existing.phone_number = unit.phone_number.clone();
                existing.password = unit.password.clone();
                existing.device = unit.device.clone();
            }
            None => units.push(unit.clone()),
        }
        self.store.set_list(UNIT_STORAGE_KEY, &units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn placeholder_uses_first_catalog_device() {
        let unit = Unit::placeholder();
        assert_eq!(unit.name, DEFAULT_UNIT_NAME);
        assert_eq!(unit.phone_number, "");
        assert_eq!(unit.device, "BoxTrack");
        assert!(unit.is_placeholder());
    }

    #[test]
    fn empty_store_lists_single_placeholder() {
        let store = UnitStore::new(MemoryStore::new());
        let units = store.list_units();
        assert_eq!(units, vec![Unit::placeholder()]);
    }

    #[test]
    fn placeholder_is_never_persisted() {
        let backing = MemoryStore::new();
        {
            let store = UnitStore::new(&backing);
            let _ = store.list_units();
        }
        assert!(backing.get_list::<Unit>(UNIT_STORAGE_KEY).is_empty());
    }

    #[test]
    fn get_unit_falls_back_to_placeholder() {
        let store = UnitStore::new(MemoryStore::new());
        let mut truck = Unit::new("Truck", "5551234", "Coban");
        truck.password = "123456".to_string();
        store.add_or_edit(&truck).unwrap();

        assert_eq!(store.get_unit("Truck"), truck);
        assert_eq!(store.get_unit("Trailer"), Unit::placeholder());
        // Exact match only.
        assert_eq!(store.get_unit("truck"), Unit::placeholder());
    }
}
