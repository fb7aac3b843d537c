use std::sync::Arc;

use skald::application::ports::TranscriptionEngine;
use skald::domain::{ComputeDevice, ModelVariant};
use skald::infrastructure::audio::{CachingTranscriptionEngine, MockTranscriptionEngine};

#[tokio::test]
async fn given_same_variant_and_device_when_loading_twice_then_inner_engine_loads_once() {
    let inner = Arc::new(MockTranscriptionEngine::returning("text", "en"));
    let caching = CachingTranscriptionEngine::new(Arc::clone(&inner) as Arc<dyn TranscriptionEngine>);
    let variant = ModelVariant::default();

    caching
        .load_model(&variant, ComputeDevice::Cpu)
        .await
        .unwrap();
    caching
        .load_model(&variant, ComputeDevice::Cpu)
        .await
        .unwrap();

    assert_eq!(inner.load_calls(), 1);
}

#[tokio::test]
async fn given_distinct_variants_when_loading_then_each_variant_loads_separately() {
    let inner = Arc::new(MockTranscriptionEngine::returning("text", "en"));
    let caching = CachingTranscriptionEngine::new(Arc::clone(&inner) as Arc<dyn TranscriptionEngine>);

    caching
        .load_model(&ModelVariant::new("tiny"), ComputeDevice::Cpu)
        .await
        .unwrap();
    caching
        .load_model(&ModelVariant::new("base"), ComputeDevice::Cpu)
        .await
        .unwrap();

    assert_eq!(inner.load_calls(), 2);
}

#[tokio::test]
async fn given_failing_inner_engine_when_loading_then_failure_is_not_cached() {
    let inner = Arc::new(MockTranscriptionEngine::failing_load("out of memory"));
    let caching = CachingTranscriptionEngine::new(Arc::clone(&inner) as Arc<dyn TranscriptionEngine>);
    let variant = ModelVariant::default();

    assert!(caching
        .load_model(&variant, ComputeDevice::Cpu)
        .await
        .is_err());
    assert!(caching
        .load_model(&variant, ComputeDevice::Cpu)
        .await
        .is_err());

    assert_eq!(inner.load_calls(), 2);
}

#[tokio::test]
async fn given_caching_wrapper_when_probing_then_delegates_to_inner_engine() {
    let inner =
        Arc::new(MockTranscriptionEngine::returning("text", "en").with_device(ComputeDevice::Cuda));
    let caching = CachingTranscriptionEngine::new(inner);

    assert_eq!(caching.probe_device(), ComputeDevice::Cuda);
}
