use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Prefix of in-flight temporary files. Encoded key names only use `%`
/// before two hex digits, so no key maps to a name starting with this.
const TEMP_PREFIX: &str = "%tmp-";

/// File-backed key-value store.
///
/// Each key maps to one file in `dir`, named by the percent-encoded key.
/// Values are written to a sibling temporary file and renamed into place,
/// so a reader never observes a half-written document. Concurrent `set`
/// calls for the same key from separate processes are not coordinated.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the stored files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` for keys that would escape the
    /// storage directory or name it.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.dir.join(file_name(key)?.as_ref()))
    }

    /// Path of the temporary file used while writing `key`.
    fn temp_path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.dir.join(format!("{TEMP_PREFIX}{}", file_name(key)?)))
    }
}

fn file_name(key: &str) -> Result<Cow<'_, str>, StorageError> {
    let name = urlencoding::encode(key);
    if name.is_empty() || name == "." || name == ".." {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }
    Ok(name)
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let tmp = self.temp_path_for(key)?;

        tokio::fs::write(&tmp, value.as_bytes()).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }
}
