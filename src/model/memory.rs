//! In-memory model store for tests and ephemeral training runs.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{Result, SyntError};
use crate::model::{decode, encode, entry_name, ModelArtifact, ModelStore};

/// A model store keeping serialized artifacts in a process-local map.
///
/// Entries hold the same bincode bytes the file store writes, so the memory
/// store exercises the full serialization path in tests. The lock makes each
/// save/purge atomic with respect to concurrent readers.
#[derive(Debug, Default)]
pub struct MemoryModelStore {
    entries: RwLock<HashMap<String, Box<[u8]>>>,
}

impl MemoryModelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryModelStore::default()
    }

    /// Number of stored artifacts.
    pub fn entry_count(&self) -> usize {
        self.entries.read().len()
    }
}

impl ModelStore for MemoryModelStore {
    fn save(&self, db: &str, store_index: u32, artifact: &ModelArtifact) -> Result<()> {
        let bytes = encode(artifact)?;
        self.entries
            .write()
            .insert(entry_name(db, store_index), bytes.into_boxed_slice());
        Ok(())
    }

    fn load(&self, db: &str, store_index: u32) -> Result<ModelArtifact> {
        let entries = self.entries.read();
        let bytes = entries.get(&entry_name(db, store_index)).ok_or_else(|| {
            SyntError::not_found(format!("no model for db '{db}' at store index {store_index}"))
        })?;
        decode(bytes)
    }

    fn exists(&self, db: &str, store_index: u32) -> bool {
        self.entries.read().contains_key(&entry_name(db, store_index))
    }

    fn purge(&self, db: &str, store_index: u32) -> Result<()> {
        self.entries.write().remove(&entry_name(db, store_index));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::artifact_fixture;

    #[test]
    fn test_save_load_roundtrip() {
        let store = MemoryModelStore::new();
        let artifact = artifact_fixture("samples", 5);

        store.save("samples", 5, &artifact).unwrap();
        assert!(store.exists("samples", 5));

        let loaded = store.load("samples", 5).unwrap();
        assert_eq!(loaded, artifact);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let store = MemoryModelStore::new();
        let err = store.load("samples", 5).unwrap_err();
        assert!(matches!(err, SyntError::NotFound(_)));
    }

    #[test]
    fn test_purge_removes_entry() {
        let store = MemoryModelStore::new();
        let artifact = artifact_fixture("samples", 5);
        store.save("samples", 5, &artifact).unwrap();

        store.purge("samples", 5).unwrap();
        assert!(!store.exists("samples", 5));
        assert!(matches!(
            store.load("samples", 5),
            Err(SyntError::NotFound(_))
        ));

        // Purging again is a no-op, not an error.
        store.purge("samples", 5).unwrap();
    }

    #[test]
    fn test_indices_are_namespaces() {
        let store = MemoryModelStore::new();
        store.save("samples", 1, &artifact_fixture("samples", 1)).unwrap();
        store.save("samples", 2, &artifact_fixture("samples", 2)).unwrap();

        store.purge("samples", 1).unwrap();
        assert!(!store.exists("samples", 1));
        assert!(store.exists("samples", 2));
        assert_eq!(store.entry_count(), 1);
    }
}
