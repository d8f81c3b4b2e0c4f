// src/wallet/file_system.rs
//! File-system wallet store.
//!
//! Layout: `<directory>/<label>.id`, one JSON identity document per file.
//! Writes go to a temporary file in the same directory which is then renamed
//! over the target, so readers never observe a partially written document.
//! Staged files are created owner-only (0600 on unix), which the rename keeps.

use super::{validate_label, WalletError, WalletStore};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const IDENTITY_FILE_SUFFIX: &str = ".id";

#[derive(Debug, Clone)]
pub struct FileSystemWalletStore {
    directory: PathBuf,
}

impl FileSystemWalletStore {
    /// Opens the wallet directory, creating it if needed.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, WalletError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| WalletError::Io {
            path: directory.clone(),
            source,
        })?;
        Ok(FileSystemWalletStore { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, label: &str) -> Result<PathBuf, WalletError> {
        validate_label(label)?;
        Ok(self
            .directory
            .join(format!("{}{}", label, IDENTITY_FILE_SUFFIX)))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> WalletError + '_ {
    move |source| WalletError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl WalletStore for FileSystemWalletStore {
    fn get(&self, label: &str) -> Result<Option<Vec<u8>>, WalletError> {
        let path = self.path_for(label)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn put(&self, label: &str, data: &[u8]) -> Result<(), WalletError> {
        let path = self.path_for(label)?;

        let mut staged = NamedTempFile::new_in(&self.directory).map_err(io_error(&self.directory))?;
        staged.write_all(data).map_err(io_error(staged.path()))?;
        staged.as_file().sync_all().map_err(io_error(staged.path()))?;
        staged
            .persist(&path)
            .map_err(|e| io_error(&path)(e.error))?;
        Ok(())
    }

    fn remove(&self, label: &str) -> Result<bool, WalletError> {
        let path = self.path_for(label)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn list(&self) -> Result<Vec<String>, WalletError> {
        let entries = fs::read_dir(&self.directory).map_err(io_error(&self.directory))?;

        let mut labels = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_error(&self.directory))?;
            let file_name = entry.file_name();
            if let Some(label) = file_name
                .to_str()
                .and_then(|name| name.strip_suffix(IDENTITY_FILE_SUFFIX))
            {
                if !label.is_empty() {
                    labels.push(label.to_string());
                }
            }
        }
        labels.sort();
        Ok(labels)
    }

    fn exists(&self, label: &str) -> Result<bool, WalletError> {
        let path = self.path_for(label)?;
        path.try_exists().map_err(io_error(&path))
    }
}
