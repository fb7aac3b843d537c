use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{
    TranscriptionEngine, TranscriptionEngineError, TranscriptionModel,
};
use crate::domain::{ComputeDevice, ModelVariant, Transcript};

enum MockBehavior {
    Return(Transcript),
    FailLoad(String),
    FailTranscribe(String),
}

/// Engine double for tests: serves a canned transcript or a scripted
/// failure, and counts model loads.
pub struct MockTranscriptionEngine {
    behavior: MockBehavior,
    device: ComputeDevice,
    load_calls: AtomicUsize,
}

impl MockTranscriptionEngine {
    pub fn returning(text: &str, language: &str) -> Self {
        Self::with_behavior(MockBehavior::Return(Transcript::new(text, language)))
    }

    pub fn failing_load(message: &str) -> Self {
        Self::with_behavior(MockBehavior::FailLoad(message.to_string()))
    }

    pub fn failing_transcribe(message: &str) -> Self {
        Self::with_behavior(MockBehavior::FailTranscribe(message.to_string()))
    }

    pub fn with_device(mut self, device: ComputeDevice) -> Self {
        self.device = device;
        self
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            device: ComputeDevice::Cpu,
            load_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    fn probe_device(&self) -> ComputeDevice {
        self.device
    }

    async fn load_model(
        &self,
        _variant: &ModelVariant,
        _device: ComputeDevice,
    ) -> Result<Arc<dyn TranscriptionModel>, TranscriptionEngineError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::FailLoad(message) => {
                Err(TranscriptionEngineError::ModelLoadFailed(message.clone()))
            }
            MockBehavior::Return(transcript) => Ok(Arc::new(MockModel {
                result: Ok(transcript.clone()),
            })),
            MockBehavior::FailTranscribe(message) => Ok(Arc::new(MockModel {
                result: Err(message.clone()),
            })),
        }
    }
}

struct MockModel {
    result: Result<Transcript, String>,
}

#[async_trait]
impl TranscriptionModel for MockModel {
    async fn transcribe(
        &self,
        _audio_path: &Path,
        _reduced_precision: bool,
    ) -> Result<Transcript, TranscriptionEngineError> {
        match &self.result {
            Ok(transcript) => Ok(transcript.clone()),
            Err(message) => Err(TranscriptionEngineError::InferenceFailed(message.clone())),
        }
    }
}
