use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::{FileAttributes, FileProcessor, FileProcessorError};
use crate::domain::Metadata;

/// Baseline processor answering straight from the local filesystem.
///
/// Attribute accessors stat the file on every call; `process` snapshots the
/// baseline attributes into the metadata record.
pub struct LocalFileProcessor {
    path: PathBuf,
    metadata: Metadata,
}

impl LocalFileProcessor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            metadata: Metadata::new(),
        }
    }

    fn stat(&self) -> Option<fs::Metadata> {
        fs::metadata(&self.path).ok()
    }
}

impl FileAttributes for LocalFileProcessor {
    fn file_path(&self) -> &Path {
        &self.path
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn owner(&self) -> String {
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            if let Some(meta) = self.stat() {
                return meta.uid().to_string();
            }
        }
        String::new()
    }

    fn size(&self) -> u64 {
        self.stat().map(|m| m.len()).unwrap_or(0)
    }

    fn modification_time(&self) -> Option<DateTime<Utc>> {
        self.stat()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from)
    }

    fn access_time(&self) -> Option<DateTime<Utc>> {
        self.stat()
            .and_then(|m| m.accessed().ok())
            .map(DateTime::<Utc>::from)
    }

    fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.stat()
            .and_then(|m| m.created().ok())
            .map(DateTime::<Utc>::from)
    }

    fn parent_directory(&self) -> Option<PathBuf> {
        self.path.parent().map(Path::to_path_buf)
    }

    fn permissions(&self) -> String {
        let Some(meta) = self.stat() else {
            return String::new();
        };
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            format!("{:o}", meta.permissions().mode() & 0o7777)
        }
        #[cfg(not(unix))]
        {
            if meta.permissions().readonly() {
                "read-only".to_string()
            } else {
                "read-write".to_string()
            }
        }
    }

    fn is_file(&self) -> bool {
        self.stat().map(|m| m.is_file()).unwrap_or(false)
    }

    fn is_symlink(&self) -> bool {
        fs::symlink_metadata(&self.path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn absolute_path(&self) -> PathBuf {
        std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

#[async_trait]
impl FileProcessor for LocalFileProcessor {
    async fn process(&mut self) -> Result<(), FileProcessorError> {
        let meta = fs::metadata(&self.path)?;

        let file_name = self.file_name();
        let extension = self.extension();
        let owner = self.owner();
        let permissions = self.permissions();
        let modification_time = self.modification_time();
        let access_time = self.access_time();
        let creation_time = self.creation_time();
        let parent_directory = self.parent_directory();
        let absolute_path = self.absolute_path();
        let is_file = self.is_file();
        let is_symlink = self.is_symlink();

        self.metadata.insert("file_name", file_name);
        self.metadata.insert("extension", extension);
        self.metadata.insert("size", meta.len());
        self.metadata.insert("owner", owner);
        self.metadata.insert("permissions", permissions);
        if let Some(t) = modification_time {
            self.metadata.insert("modification_time", t.to_rfc3339());
        }
        if let Some(t) = access_time {
            self.metadata.insert("access_time", t.to_rfc3339());
        }
        if let Some(t) = creation_time {
            self.metadata.insert("creation_time", t.to_rfc3339());
        }
        if let Some(dir) = parent_directory {
            self.metadata
                .insert("parent_directory", dir.display().to_string());
        }
        self.metadata
            .insert("absolute_path", absolute_path.display().to_string());
        self.metadata.insert("is_file", is_file);
        self.metadata.insert("is_symlink", is_symlink);

        Ok(())
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
