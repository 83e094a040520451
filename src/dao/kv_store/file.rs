use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use tracing::{info, warn};

use crate::dao::{
    models::StoredValue,
    storage::{StorageError, StorageResult},
};

use super::KeyValueStore;

/// JSON-file backed store that writes through to disk on every mutation.
///
/// The whole map is rewritten through a temporary file and renamed over the
/// target so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, StoredValue>>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file starts empty. A file that cannot be parsed is logged and
    /// ignored so the service stays available; it is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                StorageError::unavailable(format!("cannot create `{}`", parent.display()), err)
            })?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "store file is corrupt; starting from an empty store"
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "store file not found; starting empty");
                BTreeMap::new()
            }
            Err(err) => {
                return Err(StorageError::unavailable(
                    format!("cannot read `{}`", path.display()),
                    err,
                ));
            }
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str, entries: &BTreeMap<String, StoredValue>) -> StorageResult<()> {
        let payload =
            serde_json::to_vec_pretty(entries).map_err(|err| StorageError::write(key, err))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload).map_err(|err| StorageError::write(key, err))?;
        fs::rename(&tmp, &self.path).map_err(|err| StorageError::write(key, err))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<StoredValue>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: StoredValue) -> StorageResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
        self.flush(key, &entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(key, &entries)
    }

    fn health_check(&self) -> StorageResult<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::metadata(parent)
            .map(|_| ())
            .map_err(|err| StorageError::unavailable(format!("{}", parent.display()), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.set("userName", "Ada".into()).unwrap();
        store.set("gameTimer", StoredValue::Number(90)).unwrap();
        store.set("score", StoredValue::Number(3)).unwrap();
        store.remove("score").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("userName").unwrap(),
            Some(StoredValue::Text("Ada".into()))
        );
        assert_eq!(
            reopened.get("gameTimer").unwrap(),
            Some(StoredValue::Number(90))
        );
        assert!(reopened.get("score").unwrap().is_none());
        assert!(reopened.health_check().is_ok());
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.get("code").unwrap().is_none());

        store.set("code", "<p>".into()).unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("code").unwrap(),
            Some(StoredValue::Text("<p>".into()))
        );
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/session.json");

        let store = FileStore::open(&path).unwrap();
        store.set("finish", true.into()).unwrap();
        assert!(path.exists());
    }
}
