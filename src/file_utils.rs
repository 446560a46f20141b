use std::fs;
use std::io::Write;
use std::path::Path;
use log::debug;
use tempfile::NamedTempFile;

use crate::errors::{InstallError, InstallResult};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> InstallResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Creating directory {:?}", path);
            fs::create_dir_all(path).map_err(|e| InstallError::filesystem(path, e))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> InstallResult<String> {
        let path = path.as_ref();
        fs::read_to_string(path).map_err(|e| InstallError::filesystem(path, e))
    }

    /// Write a string to a file, creating parent directories first
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> InstallResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(path, content).map_err(|e| InstallError::filesystem(path, e))
    }

    /// Replace a file's contents all at once.
    ///
    /// The content goes to a temporary file next to the target which is then
    /// renamed over it, so readers see either the old or the new file.
    /// Symlinks are followed: the file they point to is replaced, the link stays.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> InstallResult<()> {
        let resolved = fs::canonicalize(path.as_ref()).unwrap_or_else(|_| path.as_ref().to_path_buf());
        let path = resolved.as_path();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| InstallError::filesystem(dir, e))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| InstallError::filesystem(temp.path(), e))?;

        // Keep the user's permission bits (scripts are usually executable)
        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(temp.path(), metadata.permissions())
                .map_err(|e| InstallError::filesystem(temp.path(), e))?;
        }

        temp.persist(path)
            .map_err(|e| InstallError::filesystem(path, e.error))?;

        Ok(())
    }

    /// Copy a file from one location to another, ensuring the target directory exists
    pub fn copy_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> InstallResult<u64> {
        let from = from.as_ref();
        let to = to.as_ref();

        if !from.exists() {
            return Err(InstallError::filesystem(
                from,
                std::io::Error::new(std::io::ErrorKind::NotFound, "source file does not exist"),
            ));
        }

        if let Some(parent) = to.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::copy(from, to).map_err(|e| InstallError::filesystem(to, e))
    }
}
