//! Atomic file persistence for JSON and TOML documents.

use portal_core::error::{PortalError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            FileFormat::Json => Ok(serde_json::from_str(content)?),
            FileFormat::Toml => Ok(toml::from_str(content)?),
        }
    }

    fn encode<T: Serialize>(self, data: &T) -> Result<String> {
        match self {
            FileFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            FileFormat::Toml => Ok(toml::to_string_pretty(data)?),
        }
    }
}

/// A document file written with tmp file + fsync + rename and mutated under
/// an exclusive advisory lock.
///
/// Readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    mode: Option<u32>,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            mode: None,
            _phantom: PhantomData,
        }
    }

    /// Unix permission bits applied to every write (ignored elsewhere).
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and decodes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and decoded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or decode the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        self.format.decode(&content).map(Some)
    }

    /// Encodes and writes `data` atomically.
    ///
    /// Each call writes through its own uniquely named temp file in the
    /// target directory, so concurrent savers never share a staging path.
    pub fn save(&self, data: &T) -> Result<()> {
        let parent = self.parent_dir();
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let encoded = self.format.encode(data)?;

        let mut tmp_file = tempfile::Builder::new()
            .prefix(&self.temp_prefix()?)
            .suffix(".tmp")
            .tempfile_in(parent)?;
        self.apply_mode(tmp_file.path())?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.as_file().sync_all()?;

        tmp_file.persist(&self.path).map_err(|e| PortalError::from(e.error))?;

        Ok(())
    }

    /// Read-modify-write under the file lock.
    ///
    /// A missing file starts from `default_value`. So does an undecodable one:
    /// the corrupt document is replaced rather than blocking every later
    /// write.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = match self.load() {
            Ok(Some(data)) => data,
            Ok(None) => default_value,
            Err(err) if err.is_serialization() => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Replacing undecodable file"
                );
                default_value
            }
            Err(err) => return Err(err),
        };

        f(&mut data)?;

        self.save(&data)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn temp_prefix(&self) -> Result<String> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| PortalError::io(format!("Path has no file name: {}", self.path.display())))?;

        Ok(format!(".{}.", file_name.to_string_lossy()))
    }

    #[cfg(unix)]
    fn apply_mode(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        if let Some(mode) = self.mode {
            fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn apply_mode(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Exclusive lock on a sibling `.lock` file, released on drop.
///
/// The lock file itself is never removed: every contender must block on the
/// same inode.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        fs2::FileExt::lock_exclusive(&file)
            .map_err(|e| PortalError::storage(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
