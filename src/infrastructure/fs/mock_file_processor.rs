use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::{FileAttributes, FileProcessor, FileProcessorError};
use crate::domain::Metadata;

/// In-memory processor double: fixed attributes, optional scripted failure,
/// and a call counter.
pub struct MockFileProcessor {
    path: PathBuf,
    metadata: Metadata,
    fail_with: Option<String>,
    process_calls: usize,
}

impl MockFileProcessor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            metadata: Metadata::new(),
            fail_with: None,
            process_calls: 0,
        }
    }

    pub fn failing(path: impl Into<PathBuf>, message: &str) -> Self {
        let mut processor = Self::new(path);
        processor.fail_with = Some(message.to_string());
        processor
    }

    pub fn process_calls(&self) -> usize {
        self.process_calls
    }
}

impl FileAttributes for MockFileProcessor {
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
        "mock".to_string()
    }

    fn size(&self) -> u64 {
        1024
    }

    fn modification_time(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn access_time(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn creation_time(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn parent_directory(&self) -> Option<PathBuf> {
        self.path.parent().map(Path::to_path_buf)
    }

    fn permissions(&self) -> String {
        "644".to_string()
    }

    fn is_file(&self) -> bool {
        true
    }

    fn is_symlink(&self) -> bool {
        false
    }

    fn absolute_path(&self) -> PathBuf {
        self.path.clone()
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

#[async_trait]
impl FileProcessor for MockFileProcessor {
    async fn process(&mut self) -> Result<(), FileProcessorError> {
        self.process_calls += 1;

        if let Some(message) = &self.fail_with {
            return Err(FileProcessorError::ExtractionFailed(message.clone()));
        }

        let file_name = self.file_name();
        self.metadata.insert("file_name", file_name);
        Ok(())
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
