use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::Metadata;

/// Read-only surface of a processed file.
///
/// Every accessor answers from the underlying source at call time. Enrichment
/// layers implement this by delegating to the processor they wrap, so any
/// downstream reader can take either interchangeably.
pub trait FileAttributes {
    fn file_path(&self) -> &Path;
    fn file_name(&self) -> String;
    fn extension(&self) -> String;
    fn owner(&self) -> String;
    fn size(&self) -> u64;
    fn modification_time(&self) -> Option<DateTime<Utc>>;
    fn access_time(&self) -> Option<DateTime<Utc>>;
    fn creation_time(&self) -> Option<DateTime<Utc>>;
    fn parent_directory(&self) -> Option<PathBuf>;
    fn permissions(&self) -> String;
    fn is_file(&self) -> bool;
    fn is_symlink(&self) -> bool;
    fn absolute_path(&self) -> PathBuf;
    fn metadata(&self) -> &Metadata;
}

/// A file processor populates the baseline metadata record for one file.
#[async_trait]
pub trait FileProcessor: FileAttributes + Send + Sync {
    async fn process(&mut self) -> Result<(), FileProcessorError>;

    fn metadata_mut(&mut self) -> &mut Metadata;
}

#[derive(Debug, thiserror::Error)]
pub enum FileProcessorError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("metadata extraction failed: {0}")]
    ExtractionFailed(String),
}
