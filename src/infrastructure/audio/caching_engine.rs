use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{
    TranscriptionEngine, TranscriptionEngineError, TranscriptionModel,
};
use crate::domain::{ComputeDevice, ModelVariant};

/// Caches loaded models per (variant, device) pair.
///
/// The plain engines reload on every call; wrap one in this when processing
/// many files with the same configuration. Behaves identically to the inner
/// engine apart from load cost.
pub struct CachingTranscriptionEngine {
    inner: Arc<dyn TranscriptionEngine>,
    models: Mutex<HashMap<(ModelVariant, ComputeDevice), Arc<dyn TranscriptionModel>>>,
}

impl CachingTranscriptionEngine {
    pub fn new(inner: Arc<dyn TranscriptionEngine>) -> Self {
        Self {
            inner,
            models: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for CachingTranscriptionEngine {
    fn probe_device(&self) -> ComputeDevice {
        self.inner.probe_device()
    }

    async fn load_model(
        &self,
        variant: &ModelVariant,
        device: ComputeDevice,
    ) -> Result<Arc<dyn TranscriptionModel>, TranscriptionEngineError> {
        let mut models = self.models.lock().await;

        if let Some(model) = models.get(&(variant.clone(), device)) {
            tracing::debug!(model = %variant, device = %device, "Reusing cached model");
            return Ok(Arc::clone(model));
        }

        let model = self.inner.load_model(variant, device).await?;
        models.insert((variant.clone(), device), Arc::clone(&model));
        Ok(model)
    }
}
