//! Resolution of resource paths to file contents on disk.
//!
//! The filesystem is only ever read. Each load opens at most one file and
//! closes it before returning.

use bytes::Bytes;
use std::fmt;
use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::config::StaticFilesConfig;
use crate::http::request::ResourcePath;

/// The whole of a file, held in memory for one response.
#[derive(Debug, Clone)]
pub struct FileContent {
    pub bytes: Bytes,
}

impl FileContent {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug)]
pub enum LoadError {
    /// No regular file at the path
    NotFound,
    /// The path resolves outside the serving root
    Forbidden,
    /// The file exists but could not be opened or read
    Io(io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound => f.write_str("file not found"),
            LoadError::Forbidden => f.write_str("path escapes the serving root"),
            LoadError::Io(e) => write!(f, "file unreadable: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(e),
        }
    }
}

/// Serves files below a root directory.
#[derive(Debug, Clone)]
pub struct FileService {
    root: PathBuf,
    confine: bool,
}

impl FileService {
    /// With `confine` off, `..` segments and absolute paths are followed
    /// wherever they lead.
    pub fn new(root: impl Into<PathBuf>, confine: bool) -> Self {
        Self {
            root: root.into(),
            confine,
        }
    }

    pub fn from_config(cfg: &StaticFilesConfig) -> Self {
        Self::new(cfg.root.clone(), cfg.confine)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a resource path to the file it names.
    pub async fn resolve(&self, path: &ResourcePath) -> Result<PathBuf, LoadError> {
        let candidate = self.root.join(path.as_str());

        if !self.confine {
            return Ok(candidate);
        }

        let root = tokio::fs::canonicalize(&self.root).await?;
        let resolved = tokio::fs::canonicalize(&candidate).await?;

        if !resolved.starts_with(&root) {
            return Err(LoadError::Forbidden);
        }

        Ok(resolved)
    }

    /// Reads the whole file named by `path`.
    pub async fn load(&self, path: &ResourcePath) -> Result<FileContent, LoadError> {
        let resolved = self.resolve(path).await?;
        let mut file = File::open(&resolved).await?;

        if !file.metadata().await?.is_file() {
            return Err(LoadError::NotFound);
        }

        let start = file.stream_position().await?;
        let end = file.seek(SeekFrom::End(0)).await?;
        file.seek(SeekFrom::Start(start)).await?;

        let mut bytes = Vec::with_capacity(end.saturating_sub(start) as usize);
        file.read_to_end(&mut bytes).await?;

        Ok(FileContent {
            bytes: Bytes::from(bytes),
        })
    }
}
