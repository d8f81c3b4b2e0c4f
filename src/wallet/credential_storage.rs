// src/wallet/credential_storage.rs
//! In-memory wallet store.
//!
//! Keeps identity documents in a mutex-guarded hashmap. Nothing survives the
//! process; workflow and wallet tests run against it.

use super::{validate_label, WalletError, WalletStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Process-local storage for identity documents.
///
/// Clones share the same underlying map, so a clone handed to one workflow
/// observes writes made through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWalletStore {
    documents: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryWalletStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry
    // (inserts replace whole values), so a poisoned map is still consistent.
    fn documents(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WalletStore for InMemoryWalletStore {
    fn get(&self, label: &str) -> Result<Option<Vec<u8>>, WalletError> {
        validate_label(label)?;
        Ok(self.documents().get(label).cloned())
    }

    /// Overwrites any existing document under `label`.
    fn put(&self, label: &str, data: &[u8]) -> Result<(), WalletError> {
        validate_label(label)?;
        self.documents().insert(label.to_string(), data.to_vec());
        Ok(())
    }

    fn remove(&self, label: &str) -> Result<bool, WalletError> {
        validate_label(label)?;
        Ok(self.documents().remove(label).is_some())
    }

    fn list(&self) -> Result<Vec<String>, WalletError> {
        let mut labels: Vec<String> = self.documents().keys().cloned().collect();
        labels.sort();
        Ok(labels)
    }

    fn exists(&self, label: &str) -> Result<bool, WalletError> {
        validate_label(label)?;
        Ok(self.documents().contains_key(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists() {
        let store = InMemoryWalletStore::new();

        // Initially should not contain
        assert!(!store.exists("admin").unwrap());

        // Add and verify exists
        store.put("admin", b"doc").unwrap();
        assert!(store.exists("admin").unwrap());
    }

    #[test]
    fn test_clones_share_documents() {
        let store = InMemoryWalletStore::new();
        let other = store.clone();

        store.put("appUser", b"doc").unwrap();
        assert_eq!(other.get("appUser").unwrap(), Some(b"doc".to_vec()));
    }

    #[test]
    fn test_list_after_operations() {
        let store = InMemoryWalletStore::new();

        store.put("zeta", b"1").unwrap();
        store.put("admin", b"2").unwrap();
        store.put("admin", b"3").unwrap();
        assert_eq!(store.list().unwrap(), vec!["admin".to_string(), "zeta".to_string()]);

        store.remove("zeta").unwrap();
        assert_eq!(store.list().unwrap(), vec!["admin".to_string()]);
    }

    #[test]
    fn test_rejects_bad_label() {
        let store = InMemoryWalletStore::new();
        assert!(matches!(
            store.put("../admin", b"doc"),
            Err(WalletError::InvalidLabel(_))
        ));
    }
}
