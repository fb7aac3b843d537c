use std::io::Write;

use skald::application::ports::{FileAttributes, FileProcessor, FileProcessorError};
use skald::domain::MetadataValue;
use skald::infrastructure::fs::LocalFileProcessor;

fn write_temp_file(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn given_existing_file_when_processing_then_populates_baseline_metadata() {
    let file = write_temp_file(b"fake audio bytes");
    let mut processor = LocalFileProcessor::new(file.path());

    processor.process().await.unwrap();

    let expected_name = file.path().file_name().unwrap().to_string_lossy();
    assert_eq!(
        processor.metadata().get("file_name"),
        Some(&MetadataValue::Text(expected_name.into_owned()))
    );
    assert_eq!(
        processor.metadata().get("extension"),
        Some(&MetadataValue::Text("mp3".to_string()))
    );
    assert_eq!(
        processor.metadata().get("size"),
        Some(&MetadataValue::Integer(16))
    );
    assert_eq!(
        processor.metadata().get("is_file"),
        Some(&MetadataValue::Bool(true))
    );
    assert!(processor.metadata().contains_key("absolute_path"));
    assert!(processor.metadata().contains_key("modification_time"));
}

#[tokio::test]
async fn given_missing_file_when_processing_then_returns_io_error() {
    let mut processor = LocalFileProcessor::new("/nonexistent/recording.wav");

    let err = processor.process().await.unwrap_err();

    assert!(matches!(err, FileProcessorError::Io(_)));
}

#[tokio::test]
async fn given_existing_file_when_reading_attributes_then_values_match_filesystem() {
    let file = write_temp_file(b"0123456789");
    let processor = LocalFileProcessor::new(file.path());

    assert_eq!(processor.size(), 10);
    assert!(processor.is_file());
    assert!(!processor.is_symlink());
    assert!(processor.parent_directory().is_some());
    assert!(processor.modification_time().is_some());
    assert!(processor.absolute_path().is_absolute());
    #[cfg(unix)]
    assert!(!processor.owner().is_empty());
}

#[tokio::test]
async fn given_processed_twice_when_reprocessing_then_keys_are_overwritten() {
    let file = write_temp_file(b"abc");
    let mut processor = LocalFileProcessor::new(file.path());

    processor.process().await.unwrap();
    let len_after_first = processor.metadata().len();
    processor.process().await.unwrap();

    assert_eq!(processor.metadata().len(), len_after_first);
}

#[cfg(unix)]
#[tokio::test]
async fn given_symlink_when_reading_attributes_then_symlink_flag_is_set() {
    let file = write_temp_file(b"linked");
    let dir = tempfile::tempdir().unwrap();
    let link = dir.path().join("link.mp3");
    std::os::unix::fs::symlink(file.path(), &link).unwrap();

    let processor = LocalFileProcessor::new(&link);

    assert!(processor.is_symlink());
    // Stat-based attributes follow the link target.
    assert!(processor.is_file());
    assert_eq!(processor.size(), 6);
}
