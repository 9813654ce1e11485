pub mod json_backend;

use std::{collections::HashMap, sync::Mutex};

use crate::{
    domain::{purchase::CURRENT_SCHEMA_VERSION, PurchaseStore},
    errors::{PersistenceReadError, TrackerError},
};

pub use json_backend::JsonStorage;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Fixed slot holding the serialized purchase store.
pub const STORE_KEY: &str = "purchases";

/// Durable key-value slots, one serialized document per key.
pub trait StorageBackend: Send + Sync {
    /// Returns `None` when nothing was ever written under `key`.
    fn read_slot(&self, key: &str) -> Result<Option<String>>;
    fn write_slot(&self, key: &str, data: &str) -> Result<()>;
}

/// Reads the purchase store from its slot. An empty slot is `Ok(None)`.
pub fn load_store(
    backend: &dyn StorageBackend,
) -> std::result::Result<Option<PurchaseStore>, PersistenceReadError> {
    let raw = match backend.read_slot(STORE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(None),
        Err(TrackerError::Io(err)) => return Err(PersistenceReadError::Io(err)),
        Err(other) => {
            return Err(PersistenceReadError::Io(std::io::Error::other(
                other.to_string(),
            )))
        }
    };
    let store: PurchaseStore = serde_json::from_str(&raw)?;
    if store.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceReadError::UnsupportedSchema {
            found: store.schema_version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    for purchase in store.all() {
        purchase
            .check_bounds()
            .map_err(|source| PersistenceReadError::OutOfBounds {
                name: purchase.name.clone(),
                source,
            })?;
    }
    Ok(Some(store))
}

pub fn save_store(backend: &dyn StorageBackend, store: &PurchaseStore) -> Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    backend.write_slot(STORE_KEY, &json)
}

/// In-process slots; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| TrackerError::Persistence("memory storage poisoned".into()))?;
        Ok(slots.get(key).cloned())
    }

    fn write_slot(&self, key: &str, data: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| TrackerError::Persistence("memory storage poisoned".into()))?;
        slots.insert(key.to_string(), data.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PurchaseDraft;
    use chrono::NaiveDate;

    #[test]
    fn empty_slot_loads_as_none() {
        let storage = MemoryStorage::new();
        assert!(load_store(&storage).unwrap().is_none());
    }

    #[test]
    fn saved_store_reads_back_in_order() {
        let storage = MemoryStorage::new();
        let mut store = PurchaseStore::new();
        for name in ["first", "second"] {
            store.push(
                PurchaseDraft::new(
                    name,
                    10.0,
                    2,
                    "Comida",
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                )
                .validate()
                .unwrap(),
            );
        }
        save_store(&storage, &store).unwrap();
        let loaded = load_store(&storage).unwrap().expect("stored");
        assert_eq!(loaded.all(), store.all());
    }

    #[test]
    fn corrupt_slot_is_a_read_error() {
        let storage = MemoryStorage::new();
        storage.write_slot(STORE_KEY, "{\"purchases\": 42").unwrap();
        assert!(matches!(
            load_store(&storage),
            Err(PersistenceReadError::Corrupt(_))
        ));
    }

    #[test]
    fn newer_schema_is_rejected() {
        let storage = MemoryStorage::new();
        storage
            .write_slot(
                STORE_KEY,
                r#"{"schema_version": 9, "updated_at": "2024-01-01T00:00:00Z", "purchases": []}"#,
            )
            .unwrap();
        assert!(matches!(
            load_store(&storage),
            Err(PersistenceReadError::UnsupportedSchema { found: 9, .. })
        ));
    }

    #[test]
    fn oversized_plan_in_storage_is_rejected() {
        let storage = MemoryStorage::new();
        let mut store = PurchaseStore::new();
        store.push(
            PurchaseDraft::new("Big", 100.0, 3, "Comida", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
                .validate()
                .unwrap(),
        );
        let mut doc = serde_json::to_value(&store).unwrap();
        doc["purchases"][0]["installments"] = serde_json::json!(3_200_000);
        storage.write_slot(STORE_KEY, &doc.to_string()).unwrap();

        let err = load_store(&storage).unwrap_err();
        assert!(matches!(err, PersistenceReadError::OutOfBounds { ref name, .. } if name == "Big"));
    }
}
