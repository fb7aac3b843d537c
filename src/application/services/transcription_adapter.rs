use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::{
    FileAttributes, FileProcessor, FileProcessorError, TranscriptionEngine,
    TranscriptionEngineError,
};
use crate::domain::{Metadata, ModelVariant, Transcript};

/// Metadata key holding the recognized text after a successful run.
pub const TRANSCRIBED_TEXT_KEY: &str = "transcribed_text";
/// Metadata key holding the detected language code.
pub const TRANSCRIBED_LANGUAGE_KEY: &str = "transcribed_language";

/// Decorates a [`FileProcessor`] with speech-to-text enrichment.
///
/// `process` first delegates to the wrapped processor, then transcribes the
/// file and merges `transcribed_text` and `transcribed_language` into the
/// shared metadata record. The wrapped processor's read-only surface is
/// exposed unchanged through [`FileAttributes`].
pub struct TranscriptionAdapter<P: FileProcessor> {
    processor: P,
    engine: Arc<dyn TranscriptionEngine>,
    model: ModelVariant,
}

impl<P: FileProcessor> TranscriptionAdapter<P> {
    pub fn new(processor: P, engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self {
            processor,
            engine,
            model: ModelVariant::default(),
        }
    }

    /// Selects the model tier used for transcription. The name is not
    /// validated here; an unknown variant fails at load time.
    pub fn with_model(mut self, model: ModelVariant) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &ModelVariant {
        &self.model
    }

    pub fn inner(&self) -> &P {
        &self.processor
    }

    pub fn into_inner(self) -> P {
        self.processor
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        self.processor.metadata_mut()
    }

    /// Runs baseline processing, then transcription.
    ///
    /// Base-processing failures propagate untranslated. Transcription
    /// failures leave the metadata exactly as the base processor left it;
    /// the two transcript keys are only written after a successful run.
    /// Calling this again re-runs transcription and overwrites both keys.
    pub async fn process(&mut self) -> Result<(), ProcessingError> {
        self.processor.process().await?;

        let transcript = self.transcribe().await?;

        let metadata = self.processor.metadata_mut();
        metadata.insert(TRANSCRIBED_TEXT_KEY, transcript.text);
        metadata.insert(TRANSCRIBED_LANGUAGE_KEY, transcript.language);

        Ok(())
    }

    /// Probes for hardware acceleration, loads the configured model variant
    /// onto the selected device, and transcribes the wrapped file. Half
    /// precision is requested only on the accelerated path.
    pub async fn transcribe(&self) -> Result<Transcript, TranscriptionError> {
        let device = self.engine.probe_device();

        tracing::debug!(
            model = %self.model,
            device = %device,
            file = %self.processor.file_path().display(),
            "Running transcription"
        );

        let model = self.engine.load_model(&self.model, device).await?;
        let transcript = model
            .transcribe(self.processor.file_path(), device.is_accelerated())
            .await?;

        tracing::info!(
            language = %transcript.language,
            chars = transcript.text.len(),
            "Transcription completed"
        );

        Ok(transcript)
    }
}

impl<P: FileProcessor> FileAttributes for TranscriptionAdapter<P> {
    fn file_path(&self) -> &Path {
        self.processor.file_path()
    }

    fn file_name(&self) -> String {
        self.processor.file_name()
    }

    fn extension(&self) -> String {
        self.processor.extension()
    }

    fn owner(&self) -> String {
        self.processor.owner()
    }

    fn size(&self) -> u64 {
        self.processor.size()
    }

    fn modification_time(&self) -> Option<DateTime<Utc>> {
        self.processor.modification_time()
    }

    fn access_time(&self) -> Option<DateTime<Utc>> {
        self.processor.access_time()
    }

    fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.processor.creation_time()
    }

    fn parent_directory(&self) -> Option<PathBuf> {
        self.processor.parent_directory()
    }

    fn permissions(&self) -> String {
        self.processor.permissions()
    }

    fn is_file(&self) -> bool {
        self.processor.is_file()
    }

    fn is_symlink(&self) -> bool {
        self.processor.is_symlink()
    }

    fn absolute_path(&self) -> PathBuf {
        self.processor.absolute_path()
    }

    fn metadata(&self) -> &Metadata {
        self.processor.metadata()
    }
}

/// Transcription failure taxonomy. Callers match on this for catch-all
/// handling; the concrete kinds are the two variants.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    /// Any failure during device selection, model loading, or inference.
    /// The embedded engine error carries the original description.
    #[error("transcription processing failed: {0}")]
    Processing(#[from] TranscriptionEngineError),
    /// Reserved for file types without audio content. Nothing in the adapter
    /// raises this; no file-type check gates transcription.
    #[error("file type not applicable for transcription: {0}")]
    NotApplicable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error(transparent)]
    Processor(#[from] FileProcessorError),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
}
