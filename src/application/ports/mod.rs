mod file_processor;
mod transcription_engine;

pub use file_processor::{FileAttributes, FileProcessor, FileProcessorError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionEngineError, TranscriptionModel};
