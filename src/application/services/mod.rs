mod transcription_adapter;

pub use transcription_adapter::{
    ProcessingError, TranscriptionAdapter, TranscriptionError, TRANSCRIBED_LANGUAGE_KEY,
    TRANSCRIBED_TEXT_KEY,
};
