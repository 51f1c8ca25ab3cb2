use crate::{
    credentials::{ACCESS_TOKEN_KEY, CredentialPair, REFRESH_TOKEN_KEY},
    store::{
        error::{Result as StorageResult, StorageError},
        token_store::TokenStore,
    },
};

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

type Entries = BTreeMap<String, String>;

/// Token store backed by a single JSON object file.
///
/// Writes go through a temp file + fsync + rename so a crash never leaves a
/// half-written file. A file that does not parse is moved aside and treated
/// as empty.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StorageResult<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::file_read(self.path.clone(), e))?;

        match serde_json::from_str::<Entries>(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!("Token file corrupted at {:?}: {e}", self.path);
                self.backup_corrupted()?;
                Ok(Entries::new())
            }
        }
    }

    fn write_entries(&self, entries: &Entries) -> StorageResult<()> {
        if entries.is_empty() {
            return self.remove_file();
        }

        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| StorageError::dir_creation(dir.to_path_buf(), e))?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let pending = PendingWrite::new(self.temp_path());

        {
            let mut file = open_private(pending.path())
                .map_err(|e| StorageError::file_write(pending.path().to_path_buf(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| StorageError::file_write(pending.path().to_path_buf(), e))?;

            file.sync_all()
                .map_err(|e| StorageError::file_write(pending.path().to_path_buf(), e))?;
        }

        pending.commit(&self.path)?;

        debug!("Saved {} token(s) to {:?}", entries.len(), self.path);
        Ok(())
    }

    fn remove_file(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed token file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::file_remove(self.path.clone(), e)),
        }
    }

    /// Renames the file to `<name>.corrupted.{timestamp}`.
    fn backup_corrupted(&self) -> StorageResult<PathBuf> {
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".corrupted.{timestamp}"));
        let backup_path = PathBuf::from(backup);

        fs::rename(&self.path, &backup_path)
            .map_err(|e| StorageError::backup_failed(self.path.clone(), e))?;

        warn!("Backed up corrupted token file to {backup_path:?}");
        Ok(backup_path)
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(format!(".tmp.{}", std::process::id()));
        PathBuf::from(temp)
    }

    fn update<F>(&self, apply: F) -> StorageResult<()>
    where
        F: FnOnce(&mut Entries),
    {
        let _guard = self.lock.lock().map_err(|_| StorageError::poisoned())?;
        let mut entries = self.read_entries()?;
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| StorageError::poisoned())?;
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn set_pair(&self, pair: &CredentialPair) -> StorageResult<()> {
        self.update(|entries| {
            entries.insert(ACCESS_TOKEN_KEY.to_string(), pair.access.clone());
            entries.insert(REFRESH_TOKEN_KEY.to_string(), pair.refresh.clone());
        })
    }

    fn clear(&self) -> StorageResult<()> {
        self.update(|entries| {
            entries.remove(ACCESS_TOKEN_KEY);
            entries.remove(REFRESH_TOKEN_KEY);
        })
    }
}

/// Temp file that is deleted on drop unless it was moved into place.
pub(crate) struct PendingWrite {
    path: PathBuf,
    committed: bool,
}

impl PendingWrite {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            committed: false,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn commit(mut self, target: &Path) -> StorageResult<()> {
        fs::rename(&self.path, target).map_err(|e| {
            StorageError::replace_failed(self.path.clone(), target.to_path_buf(), e)
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingWrite {
    fn drop(&mut self) {
        if !self.committed && fs::remove_file(&self.path).is_ok() {
            debug!("Removed leftover temp file {:?}", self.path);
        }
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}
