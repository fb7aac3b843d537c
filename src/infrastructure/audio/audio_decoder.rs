use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::TranscriptionEngineError;

/// Sample rate Whisper expects.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Decodes an audio (or video) file into 16kHz mono f32 PCM.
///
/// Container and codec are detected by probing, with the file extension as a
/// hint. Multi-channel input is downmixed; other sample rates are resampled.
pub fn decode_audio_file(path: &Path) -> Result<Vec<f32>, TranscriptionEngineError> {
    let file = File::open(path).map_err(|e| {
        TranscriptionEngineError::DecodingFailed(format!("open {}: {}", path.display(), e))
    })?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| {
            TranscriptionEngineError::UnsupportedFormat(format!("{}: {}", path.display(), e))
        })?;

    let mut format = probed.format;

    let track = format.default_track().ok_or_else(|| {
        TranscriptionEngineError::DecodingFailed("no default audio track".to_string())
    })?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let source_rate = codec_params.sample_rate.ok_or_else(|| {
        TranscriptionEngineError::DecodingFailed("source sample rate unknown".to_string())
    })?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| TranscriptionEngineError::UnsupportedFormat(format!("codec: {}", e)))?;

    let mut pcm: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(TranscriptionEngineError::DecodingFailed(format!(
                    "packet: {}",
                    e
                )));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping undecodable audio frame");
                continue;
            }
            Err(e) => {
                return Err(TranscriptionEngineError::DecodingFailed(format!(
                    "decode: {}",
                    e
                )));
            }
        };

        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }

        let mut buf = SampleBuffer::<f32>::new(frames as u64, *decoded.spec());
        buf.copy_interleaved_ref(decoded);
        push_mono(buf.samples(), channels, &mut pcm);
    }

    if pcm.is_empty() {
        return Err(TranscriptionEngineError::DecodingFailed(format!(
            "no audio samples in {}",
            path.display()
        )));
    }

    if source_rate != TARGET_SAMPLE_RATE {
        pcm = resample(&pcm, source_rate, TARGET_SAMPLE_RATE)?;
    }

    tracing::debug!(
        samples = pcm.len(),
        duration_secs = pcm.len() as f32 / TARGET_SAMPLE_RATE as f32,
        "Decoded audio to 16kHz mono PCM"
    );

    Ok(pcm)
}

fn push_mono(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    for frame in interleaved.chunks(channels) {
        out.push(frame.iter().sum::<f32>() / channels as f32);
    }
}

fn resample(
    samples: &[f32],
    from_rate: u32,
    to_rate: u32,
) -> Result<Vec<f32>, TranscriptionEngineError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let chunk_size = 1024;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, 1)
        .map_err(|e| TranscriptionEngineError::DecodingFailed(format!("resampler init: {}", e)))?;

    let mut output = Vec::with_capacity((samples.len() as f64 * ratio) as usize + chunk_size);

    for chunk in samples.chunks(chunk_size) {
        let input = if chunk.len() < chunk_size {
            let mut padded = chunk.to_vec();
            padded.resize(chunk_size, 0.0);
            padded
        } else {
            chunk.to_vec()
        };

        let processed = resampler
            .process(&[input], None)
            .map_err(|e| TranscriptionEngineError::DecodingFailed(format!("resample: {}", e)))?;

        if let Some(channel) = processed.first() {
            output.extend_from_slice(channel);
        }
    }

    // The padded tail produces surplus samples; trim to the expected length.
    let expected_len = (samples.len() as f64 * ratio) as usize;
    output.truncate(expected_len);

    Ok(output)
}
