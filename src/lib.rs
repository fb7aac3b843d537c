//! Speech-to-text enrichment for file metadata processing.
//!
//! Wraps any [`application::ports::FileProcessor`] in a
//! [`TranscriptionAdapter`] that transcribes the file's audio and merges the
//! recognized text and detected language into the shared metadata record.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::TranscriptionAdapter;
