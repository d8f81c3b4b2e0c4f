// src/wallet/mod.rs
//! Identity wallet.
//!
//! A [`Wallet`] maps identity labels to [`Credential`]s on top of a pluggable
//! [`WalletStore`]:
//! - [`FileSystemWalletStore`]: one `<label>.id` JSON document per identity
//! - `InMemoryWalletStore` (test builds only): process-local map
//!
//! The wallet also turns a stored credential back into a signing identity
//! through [`Wallet::resolve_provider`].

#[cfg(test)]
pub mod credential_storage;
pub mod file_system;
pub mod key_management;

use crate::models::credential::{Credential, CredentialKind};
use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
pub use credential_storage::InMemoryWalletStore;
pub use file_system::FileSystemWalletStore;
pub use key_management::{IdentityProvider, SigningIdentity};

/// Wallet read/write failures.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet storage error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored identity \"{label}\" is malformed")]
    Malformed {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid identity label \"{0}\"")]
    InvalidLabel(String),

    #[error("cannot build a signing identity for \"{label}\": {reason}")]
    Provider { label: String, reason: String },
}

/// Raw byte storage keyed by label.
///
/// `put` must be atomic per label: a concurrent `get` sees either the previous
/// document or the complete new one.
pub trait WalletStore {
    fn get(&self, label: &str) -> Result<Option<Vec<u8>>, WalletError>;

    fn put(&self, label: &str, data: &[u8]) -> Result<(), WalletError>;

    fn remove(&self, label: &str) -> Result<bool, WalletError>;

    /// Labels currently stored, sorted.
    fn list(&self) -> Result<Vec<String>, WalletError>;

    fn exists(&self, label: &str) -> Result<bool, WalletError> {
        Ok(self.get(label)?.is_some())
    }
}

/// Rejects labels that cannot safely become a storage key.
pub(crate) fn validate_label(label: &str) -> Result<(), WalletError> {
    let invalid = label.is_empty()
        || label == "."
        || label == ".."
        || label.contains(['/', '\\', '\0']);
    if invalid {
        return Err(WalletError::InvalidLabel(label.to_string()));
    }
    Ok(())
}

/// Credential store keyed by identity label.
#[derive(Debug, Clone)]
pub struct Wallet<S> {
    store: S,
}

impl<S: WalletStore> Wallet<S> {
    pub fn new(store: S) -> Self {
        Wallet { store }
    }

    /// Returns `true` iff a credential is stored under `label`.
    pub fn exists(&self, label: &str) -> Result<bool, WalletError> {
        self.store.exists(label)
    }

    /// Returns the stored credential, or `Ok(None)` when `label` is absent.
    ///
    /// # Errors
    /// - [`WalletError::Io`] if the store cannot be read
    /// - [`WalletError::Malformed`] if the stored document does not decode
    pub fn get(&self, label: &str) -> Result<Option<Credential>, WalletError> {
        match self.store.get(label)? {
            Some(document) => Credential::from_document(label, &document)
                .map(Some)
                .map_err(|source| WalletError::Malformed {
                    label: label.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Stores `credential` under `label`, replacing any existing entry.
    pub fn put(&self, label: &str, credential: &Credential) -> Result<(), WalletError> {
        let document = credential
            .to_document()
            .map_err(|source| WalletError::Malformed {
                label: label.to_string(),
                source,
            })?;
        self.store.put(label, &document)
    }

    pub fn remove(&self, label: &str) -> Result<bool, WalletError> {
        self.store.remove(label)
    }

    pub fn list(&self) -> Result<Vec<String>, WalletError> {
        self.store.list()
    }

    /// Returns the provider able to rebuild a signing identity for `kind`.
    pub fn resolve_provider(&self, kind: CredentialKind) -> IdentityProvider {
        IdentityProvider::for_kind(kind)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}
