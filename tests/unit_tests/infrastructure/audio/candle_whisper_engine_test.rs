use candle_core::{DType, Device};

use skald::application::ports::{TranscriptionEngine, TranscriptionEngineError};
use skald::domain::{ComputeDevice, ModelVariant};
use skald::infrastructure::audio::CandleWhisperEngine;

#[test]
fn given_cpu_device_when_selecting_dtype_then_returns_f32() {
    let dtype = CandleWhisperEngine::select_dtype(&Device::Cpu);
    assert!(matches!(dtype, DType::F32));
}

#[test]
fn given_metal_device_when_selecting_dtype_then_returns_f16() {
    let device = Device::new_metal(0).unwrap_or(Device::Cpu);
    let dtype = CandleWhisperEngine::select_dtype(&device);
    let expected = if device.is_cpu() {
        DType::F32
    } else {
        DType::F16
    };
    assert_eq!(dtype, expected);
}

#[test]
fn given_named_tier_when_resolving_then_maps_to_openai_repo() {
    let repo = CandleWhisperEngine::resolve_repo_id(&ModelVariant::new("base")).unwrap();
    assert_eq!(repo, "openai/whisper-base");
}

#[test]
fn given_explicit_repo_id_when_resolving_then_passes_through() {
    let repo =
        CandleWhisperEngine::resolve_repo_id(&ModelVariant::new("distil-whisper/distil-small.en"))
            .unwrap();
    assert_eq!(repo, "distil-whisper/distil-small.en");
}

#[test]
fn given_unknown_variant_when_resolving_then_returns_unknown_variant_error() {
    let result = CandleWhisperEngine::resolve_repo_id(&ModelVariant::new("gigantic"));

    assert!(matches!(
        result,
        Err(TranscriptionEngineError::UnknownVariant(ref name)) if name == "gigantic"
    ));
}

#[test]
fn given_host_without_accelerator_when_probing_then_selects_cpu() {
    let device = CandleWhisperEngine::new().probe_device();

    if !candle_core::utils::cuda_is_available() && !candle_core::utils::metal_is_available() {
        assert_eq!(device, ComputeDevice::Cpu);
    } else {
        assert!(device.is_accelerated());
    }
}
