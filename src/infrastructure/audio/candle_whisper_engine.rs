use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{
    TranscriptionEngine, TranscriptionEngineError, TranscriptionModel,
};
use crate::domain::{ComputeDevice, ModelVariant, Transcript};

use super::audio_decoder::decode_audio_file;

/// Repository carrying the precomputed 80-bin mel filterbank.
const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";

/// Upper bound on tokens decoded per 30s audio segment.
const MAX_DECODE_TOKENS: usize = 224;

/// Language tags probed against the tokenizer vocabulary for detection.
/// English-only checkpoints carry none of these; detection then defaults
/// to "en".
const LANGUAGE_CODES: &[&str] = &[
    "en", "zh", "de", "es", "ru", "ko", "fr", "ja", "pt", "tr", "pl", "ca", "nl", "ar", "sv",
    "it", "id", "hi", "fi", "vi", "he", "uk", "el", "ms", "cs", "ro", "da", "hu", "ta", "no",
    "th", "ur", "hr", "bg", "lt", "la", "mi", "ml", "cy", "sk", "te", "fa", "lv", "bn", "sr",
    "az", "sl", "kn", "et", "mk", "br", "eu", "is", "hy", "ne", "mn", "bs", "kk", "sq", "sw",
    "gl", "mr", "pa", "si", "km", "sn", "yo", "so", "af", "oc", "ka", "be", "tg", "sd", "gu",
    "am", "yi", "lo", "uz", "fo", "ht", "ps", "tk", "nn", "mt", "sa", "lb", "my", "bo", "tl",
    "mg", "as", "tt", "haw", "ln", "ha", "ba", "jw", "su",
];

/// Loads Whisper checkpoints from the Hugging Face hub and runs local
/// inference through candle. Stateless; every `load_model` call fetches and
/// builds the model anew.
pub struct CandleWhisperEngine;

impl CandleWhisperEngine {
    pub fn new() -> Self {
        Self
    }

    /// Half precision on accelerated devices, f32 on CPU.
    pub fn select_dtype(device: &Device) -> DType {
        if device.is_cpu() {
            DType::F32
        } else {
            DType::F16
        }
    }

    /// Maps a variant name to a hub repository id. Names containing a `/`
    /// are taken as explicit repository ids.
    pub fn resolve_repo_id(variant: &ModelVariant) -> Result<String, TranscriptionEngineError> {
        let name = variant.as_str();
        if name.contains('/') {
            return Ok(name.to_string());
        }
        match name {
            "tiny" | "base" | "small" | "medium" | "large-v2" => {
                Ok(format!("openai/whisper-{}", name))
            }
            other => Err(TranscriptionEngineError::UnknownVariant(other.to_string())),
        }
    }

    fn open_device(device: ComputeDevice) -> Result<Device, TranscriptionEngineError> {
        match device {
            ComputeDevice::Cpu => Ok(Device::Cpu),
            ComputeDevice::Cuda => Device::new_cuda(0).map_err(|e| {
                TranscriptionEngineError::DeviceUnavailable(format!("cuda: {}", e))
            }),
            ComputeDevice::Metal => Device::new_metal(0).map_err(|e| {
                TranscriptionEngineError::DeviceUnavailable(format!("metal: {}", e))
            }),
        }
    }
}

impl Default for CandleWhisperEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    fn probe_device(&self) -> ComputeDevice {
        if candle_core::utils::cuda_is_available() {
            ComputeDevice::Cuda
        } else if candle_core::utils::metal_is_available() {
            ComputeDevice::Metal
        } else {
            ComputeDevice::Cpu
        }
    }

    async fn load_model(
        &self,
        variant: &ModelVariant,
        device: ComputeDevice,
    ) -> Result<Arc<dyn TranscriptionModel>, TranscriptionEngineError> {
        let repo_id = Self::resolve_repo_id(variant)?;
        let device = Self::open_device(device)?;

        // Hub downloads and safetensors reads are blocking.
        let model = tokio::task::spawn_blocking(move || WhisperModel::load(&repo_id, device))
            .await
            .map_err(|e| TranscriptionEngineError::ModelLoadFailed(format!("load task: {}", e)))??;

        Ok(Arc::new(model))
    }
}

struct WhisperModel {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    dtype: DType,
    mel_filters: Vec<f32>,
}

impl WhisperModel {
    fn load(repo_id: &str, device: Device) -> Result<Self, TranscriptionEngineError> {
        tracing::info!(model = repo_id, device = ?device, "Loading Whisper model");

        let api = Api::new()
            .map_err(|e| TranscriptionEngineError::ModelLoadFailed(format!("hub api: {}", e)))?;
        let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));

        let config_path = repo.get("config.json").map_err(|e| {
            TranscriptionEngineError::ModelLoadFailed(format!("config.json: {}", e))
        })?;
        let tokenizer_path = repo.get("tokenizer.json").map_err(|e| {
            TranscriptionEngineError::ModelLoadFailed(format!("tokenizer.json: {}", e))
        })?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionEngineError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionEngineError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents).map_err(|e| {
            TranscriptionEngineError::ModelLoadFailed(format!("parse config: {}", e))
        })?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionEngineError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_filters = load_mel_filters(&api, &config)?;

        let dtype = CandleWhisperEngine::select_dtype(&device);

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| TranscriptionEngineError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionEngineError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!(dtype = ?dtype, "Whisper model loaded");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            dtype,
            mel_filters,
        })
    }

    fn mel_chunks(&self, pcm: &[f32]) -> Result<Vec<Tensor>, TranscriptionEngineError> {
        let mut chunks = Vec::new();

        for chunk in pcm.chunks(m::N_SAMPLES) {
            let samples = if chunk.len() < m::N_SAMPLES {
                let mut padded = chunk.to_vec();
                padded.resize(m::N_SAMPLES, 0.0);
                padded
            } else {
                chunk.to_vec()
            };

            let mel = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
            let n_mel = self.config.num_mel_bins;
            let n_frames = mel.len() / n_mel;

            let tensor = Tensor::from_vec(mel, (1, n_mel, n_frames), &self.device)
                .and_then(|t| t.to_dtype(self.dtype))
                .map_err(|e| {
                    TranscriptionEngineError::InferenceFailed(format!("mel tensor: {}", e))
                })?;

            chunks.push(tensor);
        }

        Ok(chunks)
    }
}

#[async_trait]
impl TranscriptionModel for WhisperModel {
    async fn transcribe(
        &self,
        audio_path: &Path,
        reduced_precision: bool,
    ) -> Result<Transcript, TranscriptionEngineError> {
        if reduced_precision != (self.dtype == DType::F16) {
            tracing::debug!(
                requested = reduced_precision,
                dtype = ?self.dtype,
                "Precision hint differs from loaded dtype; dtype was fixed at load"
            );
        }

        let pcm = decode_audio_file(audio_path)?;
        let mel_chunks = self.mel_chunks(&pcm)?;

        let mut model = self.model.lock().await;

        // Language is detected on the first segment and reused for the rest.
        let mut language: Option<(u32, String)> = None;
        let mut segments: Vec<String> = Vec::new();

        for (i, mel) in mel_chunks.iter().enumerate() {
            tracing::debug!(segment = i, "Transcribing audio segment");

            let audio_features = model.encoder.forward(mel, true).map_err(|e| {
                TranscriptionEngineError::InferenceFailed(format!("encoder: {}", e))
            })?;

            if language.is_none() {
                language = detect_language(&mut model, &self.tokenizer, &audio_features)?;
            }

            let text = decode_segment(
                &mut model,
                &self.tokenizer,
                &self.device,
                &audio_features,
                language.as_ref().map(|(id, _)| *id),
            )?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        let text = segments.join(" ");
        let language = language
            .map(|(_, code)| code)
            .unwrap_or_else(|| "en".to_string());

        tracing::info!(
            segments = segments.len(),
            chars = text.len(),
            language = %language,
            "Audio transcription completed"
        );

        Ok(Transcript::new(text, language))
    }
}

/// Picks the most probable language token from a single decoder step over
/// the start-of-transcript prompt. Returns `None` for English-only
/// checkpoints whose vocabulary has no language tags.
fn detect_language(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    audio_features: &Tensor,
) -> Result<Option<(u32, String)>, TranscriptionEngineError> {
    let language_tokens: Vec<(u32, &str)> = LANGUAGE_CODES
        .iter()
        .filter_map(|code| {
            tokenizer
                .token_to_id(&format!("<|{}|>", code))
                .map(|id| (id, *code))
        })
        .collect();

    if language_tokens.is_empty() {
        return Ok(None);
    }

    let sot = token_id(tokenizer, m::SOT_TOKEN)?;
    let prompt = Tensor::new(&[sot], audio_features.device())
        .and_then(|t| t.unsqueeze(0))
        .map_err(|e| TranscriptionEngineError::InferenceFailed(format!("lang prompt: {}", e)))?;

    let output = model
        .decoder
        .forward(&prompt, audio_features, true)
        .map_err(|e| TranscriptionEngineError::InferenceFailed(format!("lang decoder: {}", e)))?;
    let logits = model
        .decoder
        .final_linear(&output)
        .and_then(|t| t.squeeze(0))
        .and_then(|t| t.get(0))
        .and_then(|t| t.to_dtype(DType::F32))
        .map_err(|e| TranscriptionEngineError::InferenceFailed(format!("lang logits: {}", e)))?;
    model.reset_kv_cache();

    let scores: Vec<f32> = logits
        .to_vec1()
        .map_err(|e| TranscriptionEngineError::InferenceFailed(format!("lang scores: {}", e)))?;

    let score = |id: u32| scores.get(id as usize).copied().unwrap_or(f32::NEG_INFINITY);
    let best = language_tokens
        .iter()
        .max_by(|a, b| score(a.0).total_cmp(&score(b.0)))
        .ok_or_else(|| {
            TranscriptionEngineError::InferenceFailed("no language tokens scored".to_string())
        })?;

    Ok(Some((best.0, best.1.to_string())))
}

fn decode_segment(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    audio_features: &Tensor,
    language_token: Option<u32>,
) -> Result<String, TranscriptionEngineError> {
    let sot = token_id(tokenizer, m::SOT_TOKEN)?;
    let transcribe = token_id(tokenizer, m::TRANSCRIBE_TOKEN)?;
    let no_timestamps = token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?;
    let eot = token_id(tokenizer, m::EOT_TOKEN)?;

    let mut tokens = vec![sot];
    if let Some(lang) = language_token {
        tokens.push(lang);
    }
    tokens.push(transcribe);
    tokens.push(no_timestamps);
    let prompt_len = tokens.len();

    for _ in 0..MAX_DECODE_TOKENS {
        let input = Tensor::new(tokens.as_slice(), device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| TranscriptionEngineError::InferenceFailed(e.to_string()))?;

        let output = model
            .decoder
            .forward(&input, audio_features, tokens.len() == prompt_len)
            .map_err(|e| TranscriptionEngineError::InferenceFailed(format!("decoder: {}", e)))?;

        let logits = model
            .decoder
            .final_linear(&output)
            .and_then(|t| t.squeeze(0))
            .map_err(|e| TranscriptionEngineError::InferenceFailed(format!("linear: {}", e)))?;

        let seq_len = logits
            .dim(0)
            .map_err(|e| TranscriptionEngineError::InferenceFailed(e.to_string()))?;
        let next_token = logits
            .get(seq_len - 1)
            .and_then(|t| t.argmax(0))
            .and_then(|t| t.to_scalar::<u32>())
            .map_err(|e| TranscriptionEngineError::InferenceFailed(e.to_string()))?;

        if next_token == eot {
            break;
        }
        tokens.push(next_token);
    }

    model.reset_kv_cache();

    let text_tokens = &tokens[prompt_len..];
    let text = tokenizer
        .decode(text_tokens, true)
        .map_err(|e| TranscriptionEngineError::InferenceFailed(format!("detokenize: {}", e)))?;

    Ok(text.trim().to_string())
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionEngineError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionEngineError::InferenceFailed(format!("token not found: {}", token))
    })
}

fn load_mel_filters(api: &Api, config: &Config) -> Result<Vec<f32>, TranscriptionEngineError> {
    if config.num_mel_bins != 80 {
        return Err(TranscriptionEngineError::ModelLoadFailed(format!(
            "{}-bin mel filterbank not available; only 80-bin checkpoints are supported",
            config.num_mel_bins
        )));
    }

    let repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));
    let path = repo.get("melfilters.bytes").map_err(|e| {
        TranscriptionEngineError::ModelLoadFailed(format!("melfilters.bytes: {}", e))
    })?;
    let bytes = std::fs::read(&path)
        .map_err(|e| TranscriptionEngineError::ModelLoadFailed(format!("mel filters: {}", e)))?;

    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionEngineError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}
