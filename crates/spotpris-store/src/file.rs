//! JSON file document store.

use async_trait::async_trait;
use directories::ProjectDirs;
use fd_lock::RwLock;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::store::{
    DocumentStore, Result, StoreError, apply_increment, empty_document, path_segments,
};

/// Stores each document as a JSON file below a base directory.
///
/// The document `a/b/c` lives at `{base}/a/b/c.json`. Mutations hold an
/// advisory lock on `{base}/a/b/c.json.lock`, so several processes can share
/// one directory without losing increments. Documents are only ever replaced
/// by renaming or linking a complete temporary file into place.
#[derive(Debug)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `base_path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_path: PathBuf) -> Result<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| StoreError::CreateDir {
                path: base_path.clone(),
                source: e,
            })?;
        }

        Ok(Self { base_path })
    }

    /// Returns the default data directory.
    ///
    /// Uses the `directories` crate to find the appropriate location:
    /// - Linux: `~/.local/share/spotpris/`
    /// - macOS: `~/Library/Application Support/spotpris/`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\spotpris\`
    ///
    /// Falls back to `~/.spotpris/` if the platform-specific location
    /// cannot be determined.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "spotpris").map_or_else(dirs_fallback, |proj_dirs| {
            proj_dirs.data_dir().to_path_buf()
        })
    }

    /// Creates a store at the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_default_path() -> Result<Self> {
        Self::new(Self::default_path())
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the file a document path maps to.
    ///
    /// # Errors
    ///
    /// Returns an error if the document path is invalid.
    pub fn document_path(&self, path: &str) -> Result<PathBuf> {
        let segments = path_segments(path)?;
        let mut file = self.base_path.clone();
        if let Some((last, parents)) = segments.split_last() {
            file.extend(parents);
            file.push(format!("{last}.json"));
        }
        Ok(file)
    }

    /// Runs blocking file work off the async runtime.
    async fn blocking<T, F>(op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        tokio::task::spawn_blocking(op)
            .await
            .map_err(|e| StoreError::Unavailable(format!("store task failed: {e}")))?
    }

    /// Runs `op` on the document file while holding its lock file.
    async fn locked<T, F>(&self, path: &str, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T> + Send + 'static,
    {
        let file = self.document_path(path)?;
        Self::blocking(move || {
            ensure_parent(&file)?;
            let lock_path = file.with_extension("json.lock");
            let lock_file = OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(&lock_path)
                .map_err(|e| StoreError::Lock {
                    path: lock_path.clone(),
                    source: e,
                })?;

            let mut lock = RwLock::new(lock_file);
            let _guard = lock.write().map_err(|e| StoreError::Lock {
                path: lock_path.clone(),
                source: e,
            })?;
            op(&file)
        })
        .await
    }
}

fn ensure_parent(file: &Path) -> Result<()> {
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

fn read_document(path: &str, file: &Path) -> Result<Option<Value>> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::ReadFile {
                path: file.to_path_buf(),
                source: e,
            });
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| StoreError::ParseJson {
            path: path.to_string(),
            source: e,
        })
}

/// Writes `document` to a uniquely named temporary file next to `file`.
fn write_temp(file: &Path, document: &Value) -> Result<NamedTempFile> {
    let write_error = |source| StoreError::WriteFile {
        path: file.to_path_buf(),
        source,
    };

    let parent = file.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(parent).map_err(write_error)?;
    serde_json::to_writer_pretty(&mut tmp, document)?;
    tmp.flush().map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    Ok(tmp)
}

/// Replaces `file` so readers see either the old or the new document.
fn replace_document(file: &Path, document: &Value) -> Result<()> {
    write_temp(file, document)?
        .persist(file)
        .map_err(|e| StoreError::WriteFile {
            path: file.to_path_buf(),
            source: e.error,
        })?;
    Ok(())
}

/// Links a complete copy of `document` into place unless `file` exists.
fn create_document(file: &Path, document: &Value) -> Result<bool> {
    let tmp = write_temp(file, document)?;
    match fs::hard_link(tmp.path(), file) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(StoreError::WriteFile {
            path: file.to_path_buf(),
            source: e,
        }),
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        let file = self.document_path(path)?;
        let path = path.to_string();
        Self::blocking(move || read_document(&path, &file)).await
    }

    async fn set(&self, path: &str, document: Value) -> Result<()> {
        self.locked(path, move |file| replace_document(file, &document))
            .await
    }

    async fn create(&self, path: &str, document: Value) -> Result<bool> {
        self.locked(path, move |file| create_document(file, &document))
            .await
    }

    async fn increment(&self, path: &str, field: &str, by: i64) -> Result<i64> {
        let owned = path.to_string();
        let field = field.to_string();
        self.locked(path, move |file| {
            let mut document = read_document(&owned, file)?.unwrap_or_else(empty_document);
            let value = apply_increment(&owned, &mut document, &field, by)?;
            replace_document(file, &document)?;
            Ok(value)
        })
        .await
    }
}

/// Fallback for determining home directory.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".spotpris")
}
