//! Log storage backed by a single JSON file.
//!
//! Every replace writes a sibling temp file, syncs it, then renames it over
//! the log. A crash mid-write leaves either the old file or the new one.

use async_trait::async_trait;
use promptlog_application::LogStorage;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Default log file name, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "logs.json";

/// File-backed [`LogStorage`] with atomic replace.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `logs.json` → `logs.json.tmp`, in the same directory so the rename
    /// never crosses filesystems.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("log"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_temp(&self, temp: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = File::create(temp).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl LogStorage for JsonFileStorage {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn replace(&self, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp = self.temp_path();
        if let Err(e) = self.write_temp(&temp, contents).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e);
        }

        debug!("Wrote {} bytes to {}", contents.len(), self.path.display());
        Ok(())
    }
}
