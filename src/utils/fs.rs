//! File system utility functions
//!
//! Provides directory listing and path handling with proper error handling.

use crate::error::{ConsoleError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, instrument};

/// Utility struct for file system operations
#[derive(Debug)]
pub struct FileSystemUtils;

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// File name of the entry
    pub name: String,
    /// Whether the entry (after following links) is a directory
    pub is_dir: bool,
}

impl FileSystemUtils {
    /// Create a new file system utilities instance
    pub fn new() -> Self {
        Self
    }

    /// List a directory: directories first, then files, each group
    /// ordered case-insensitively by name
    #[instrument(skip(self))]
    pub fn list_dir<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<Vec<DirEntryInfo>> {
        let path = path.as_ref();
        debug!("Listing directory: {}", path.display());

        let read_error = |e: std::io::Error| ConsoleError::file_system("list", path, e);
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let is_dir = fs::metadata(entry.path())
                .map(|meta| meta.is_dir())
                .unwrap_or(false);
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }

        sort_entries(&mut entries);
        debug!("Listed {} entries", entries.len());
        Ok(entries)
    }

    /// Check if a path exists and is a file
    pub fn is_file<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_file()
    }

    /// Check if a path exists and is a directory
    pub fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_dir()
    }

    /// Check that a directory can be entered. On unix that takes search
    /// permission, not read permission.
    #[instrument(skip(self))]
    pub fn check_enterable<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let entered = if cfg!(unix) {
            // Resolving `.` inside the directory fails without `x`.
            fs::metadata(path.join(".")).map(|_| ())
        } else {
            fs::read_dir(path).map(|_| ())
        };
        entered.map_err(|e| ConsoleError::file_system("enter", path, e))
    }
}

impl Default for FileSystemUtils {
    fn default() -> Self {
        Self::new()
    }
}

/// Order entries directories-first, then case-insensitively by name
pub fn sort_entries(entries: &mut [DirEntryInfo]) {
    entries.sort_by_cached_key(|entry| (!entry.is_dir, entry.name.to_lowercase()));
}

/// Resolve `.` and `..` components without touching the file system
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    normalized.pop();
                }
            }
            Component::Normal(part) => normalized.push(part),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
