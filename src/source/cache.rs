//! On-disk page snapshots.
//!
//! A snapshot is the raw HTML of a fetched page, stored at
//! `<cache_dir>/<site>/<decoded query>.html`. Separators in the query are
//! replaced so every snapshot stays directly under its site directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Page snapshot cache.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    cache_dir: PathBuf,
}

impl SnapshotCache {
    /// Create a cache rooted at `cache_dir`. Directories are created on write.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Create a cache in the default location (user cache directory).
    pub fn default_location() -> Self {
        Self::new(default_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of the snapshot for `key` under `site`.
    pub fn path(&self, site: &str, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.cache_dir.join(site).join(format!("{file_name}.html"))
    }

    /// Read a snapshot. Unreadable snapshots count as missing.
    pub fn get(&self, site: &str, key: &str) -> Option<String> {
        let path = self.path(site, key);
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(body) => {
                tracing::debug!(path = %path.display(), "Snapshot found");
                Some(body)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Could not read snapshot");
                None
            }
        }
    }

    /// Store a snapshot, returning its path.
    pub fn put(&self, site: &str, key: &str, body: &str) -> Result<PathBuf, io::Error> {
        let path = self.path(site, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, body)?;
        Ok(path)
    }

    /// Check if a snapshot exists.
    pub fn contains(&self, site: &str, key: &str) -> bool {
        self.path(site, key).exists()
    }

    /// Remove every snapshot of every site.
    pub fn clear(&self) -> Result<(), io::Error> {
        if !self.cache_dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            for file in fs::read_dir(entry.path())? {
                let file = file?;
                if file.file_type()?.is_file()
                    && file.path().extension().is_some_and(|ext| ext == "html")
                {
                    fs::remove_file(file.path())?;
                }
            }
        }
        Ok(())
    }
}

/// Default snapshot directory.
pub fn default_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("liner-notes")
        .join("pages")
}
