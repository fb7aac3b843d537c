use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ComputeDevice, ModelVariant, Transcript};

/// External speech-to-text provider: probe the hardware, then load a model
/// for a (variant, device) pair. Loading is expensive and happens on every
/// call unless the caller wraps the engine in a caching layer.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Reports the best compute path available on this host.
    fn probe_device(&self) -> ComputeDevice;

    async fn load_model(
        &self,
        variant: &ModelVariant,
        device: ComputeDevice,
    ) -> Result<Arc<dyn TranscriptionModel>, TranscriptionEngineError>;
}

/// A loaded model handle.
#[async_trait]
pub trait TranscriptionModel: Send + Sync {
    /// Transcribes the audio (or audio track of a video) at `audio_path`.
    /// `reduced_precision` requests half-precision compute and is only
    /// honored on accelerated devices.
    async fn transcribe(
        &self,
        audio_path: &Path,
        reduced_precision: bool,
    ) -> Result<Transcript, TranscriptionEngineError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionEngineError {
    #[error("unknown model variant: {0}")]
    UnknownVariant(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
