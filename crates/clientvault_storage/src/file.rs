//! Directory-backed key/value store for persistent storage.

use crate::error::{StorageError, StorageResult};
use crate::store::{validate_key, KeyValueStore};
use parking_lot::RwLock;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension used for stored values.
pub const FILE_EXTENSION: &str = "vault";

/// A directory-backed key/value store.
///
/// Each key maps to one file `<dir>/<key>.vault` holding the value as UTF-8
/// text. Values survive process restarts.
///
/// # Durability
///
/// - `write()` writes a temporary sibling file, syncs it, then renames it
///   over the target so readers never observe a half-written value
///   and a failed write removes the temporary file
/// - `remove()` deletes the file; removing an absent key is a no-op
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads.
/// An internal lock serializes writers within one process; separate
/// processes writing the same key race with last-write-wins semantics.
///
/// # Example
///
/// ```no_run
/// use clientvault_storage::{KeyValueStore, FileStore};
/// use std::path::Path;
///
/// let store = FileStore::open(Path::new("clientvault-data")).unwrap();
/// store.write("clients", "encoded envelope").unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    /// Opens a file store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            lock: RwLock::new(()),
        })
    }

    /// Returns the data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{FILE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        let _guard = self.lock.read();

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(StorageError::Corrupted(
                format!("{} is not valid UTF-8", path.display()),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{key}.{FILE_EXTENSION}.tmp"));
        let _guard = self.lock.write();

        let written = fs::File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(value.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = written {
            // Best effort cleanup.
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(key, bytes = value.len(), "wrote value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let _guard = self.lock.write();

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "removed value");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let _guard = self.lock.read();
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_open_creates_directory() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");

        let store = FileStore::open(&data_dir).unwrap();
        assert!(data_dir.is_dir());
        assert_eq!(store.dir(), data_dir.as_path());
    }

    #[test]
    fn file_write_and_read() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.write("clients", "hello world").unwrap();
        assert_eq!(
            store.read("clients").unwrap().as_deref(),
            Some("hello world")
        );
        assert!(dir.path().join("clients.vault").exists());
    }

    #[test]
    fn file_read_missing_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.read("orders").unwrap().is_none());
    }

    #[test]
    fn file_persistence_across_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = FileStore::open(dir.path()).unwrap();
            store.write("user", "persistent").unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.read("user").unwrap().as_deref(), Some("persistent"));
    }

    #[test]
    fn file_write_overwrites_without_leftover_tmp() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.write("orders", "a much longer first value").unwrap();
        store.write("orders", "short").unwrap();

        assert_eq!(store.read("orders").unwrap().as_deref(), Some("short"));
        assert!(!dir.path().join("orders.vault.tmp").exists());
    }

    #[test]
    fn file_failed_write_leaves_no_tmp() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        // A non-empty directory at the target path makes the rename fail.
        let target = dir.path().join("clients.vault");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        assert!(matches!(
            store.write("clients", "value"),
            Err(StorageError::Io(_))
        ));
        assert!(!dir.path().join("clients.vault.tmp").exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn file_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.write("customFields", "x").unwrap();
        store.remove("customFields").unwrap();
        assert!(store.read("customFields").unwrap().is_none());

        // Removing again is fine
        store.remove("customFields").unwrap();
    }

    #[test]
    fn file_keys_ignore_foreign_files() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.write("user", "u").unwrap();
        store.write("clients", "c").unwrap();
        fs::write(dir.path().join("notes.txt"), "unrelated").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["clients", "user"]);
    }

    #[test]
    fn file_rejects_path_traversal() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        let result = store.write("../escape", "x");
        assert!(matches!(result, Err(StorageError::InvalidKey { .. })));
    }

    #[test]
    fn file_invalid_utf8_is_corrupted() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("clients.vault"), [0xff, 0xfe, 0x00]).unwrap();

        let result = store.read("clients");
        assert!(matches!(result, Err(StorageError::Corrupted(_))));
    }
}
