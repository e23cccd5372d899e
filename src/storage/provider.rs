//! Durable storage providers
//!
//! A provider moves the whole document as text over one named resource.
//! The file provider never overwrites in place: it writes a sibling
//! temporary file, fsyncs it, renames it over the target and fsyncs the
//! directory, so an interrupted write leaves the previous document intact.

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::core::{DexError, DexResult};

/// Text storage over a single named resource
pub trait StorageProvider: Send + Sync {
    /// Stable name of the resource; writers to the same name are serialized.
    fn resource_name(&self) -> String;

    /// Whether the resource currently holds a document
    fn exists(&self) -> bool;

    /// Read the full resource
    fn read_text(&self) -> DexResult<String>;

    /// Replace the full resource
    fn write_text(&self, text: &str) -> DexResult<()>;
}

/// JSON file on the local filesystem
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }
}

impl StorageProvider for FileStorage {
    fn resource_name(&self) -> String {
        let absolute = if self.path.is_absolute() {
            self.path.clone()
        } else {
            env::current_dir()
                .map(|cwd| cwd.join(&self.path))
                .unwrap_or_else(|_| self.path.clone())
        };
        absolute.display().to_string()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read_text(&self) -> DexResult<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            DexError::storage(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }

    fn write_text(&self, text: &str) -> DexResult<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&parent).map_err(|e| {
            DexError::storage(format!("Failed to create {}: {}", parent.display(), e))
        })?;

        let tmp = self.temp_path();
        let mut file = File::create(&tmp).map_err(|e| {
            DexError::storage(format!("Failed to create {}: {}", tmp.display(), e))
        })?;

        file.write_all(text.as_bytes()).map_err(|e| {
            DexError::storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;

        file.sync_all().map_err(|e| {
            DexError::storage(format!("Failed to fsync {}: {}", tmp.display(), e))
        })?;
        drop(file);

        fs::rename(&tmp, &self.path).map_err(|e| {
            DexError::storage(format!(
                "Failed to move {} over {}: {}",
                tmp.display(),
                self.path.display(),
                e
            ))
        })?;

        fsync_dir(&parent)
    }
}

/// fsync a directory so the rename is durable.
#[cfg(unix)]
fn fsync_dir(path: &Path) -> DexResult<()> {
    let dir = fs::OpenOptions::new().read(true).open(path).map_err(|e| {
        DexError::storage(format!("Failed to open directory {}: {}", path.display(), e))
    })?;

    dir.sync_all().map_err(|e| {
        DexError::storage(format!("fsync directory failed: {}: {}", path.display(), e))
    })
}

#[cfg(not(unix))]
fn fsync_dir(_path: &Path) -> DexResult<()> {
    Ok(())
}

/// In-memory provider for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStorage {
    name: String,
    text: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let storage = Self::new(name);
        *storage.slot() = Some(text.into());
        storage
    }

    /// Makes every following write fail with a storage error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current raw contents
    pub fn snapshot(&self) -> Option<String> {
        self.slot().clone()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.text.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageProvider for MemoryStorage {
    fn resource_name(&self) -> String {
        format!("memory:{}", self.name)
    }

    fn exists(&self) -> bool {
        self.slot().is_some()
    }

    fn read_text(&self) -> DexResult<String> {
        self.slot()
            .clone()
            .ok_or_else(|| DexError::storage(format!("{} is empty", self.resource_name())))
    }

    fn write_text(&self, text: &str) -> DexResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DexError::storage(format!(
                "write to {} refused",
                self.resource_name()
            )));
        }
        *self.slot() = Some(text.to_string());
        Ok(())
    }
}
