use std::io::Write;

use skald::application::ports::TranscriptionEngineError;
use skald::infrastructure::audio::audio_decoder::{decode_audio_file, TARGET_SAMPLE_RATE};

fn build_wav(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let block_align = channels * 2;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

fn write_temp_wav(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn given_16khz_mono_wav_when_decoding_then_samples_pass_through() {
    let samples: Vec<i16> = vec![0i16; 1600];
    let file = write_temp_wav(&build_wav(TARGET_SAMPLE_RATE, 1, &samples));

    let pcm = decode_audio_file(file.path()).unwrap();

    assert_eq!(pcm.len(), 1600);
}

#[test]
fn given_stereo_wav_when_decoding_then_downmixes_to_mono() {
    // 1600 frames of interleaved stereo.
    let samples: Vec<i16> = vec![0i16; 3200];
    let file = write_temp_wav(&build_wav(TARGET_SAMPLE_RATE, 2, &samples));

    let pcm = decode_audio_file(file.path()).unwrap();

    assert_eq!(pcm.len(), 1600);
}

#[test]
fn given_44100hz_wav_when_decoding_then_resamples_to_16khz() {
    // 0.1s at 44.1kHz resamples to 0.1s at 16kHz.
    let samples: Vec<i16> = vec![0i16; 4410];
    let file = write_temp_wav(&build_wav(44_100, 1, &samples));

    let pcm = decode_audio_file(file.path()).unwrap();

    assert_eq!(pcm.len(), 1600);
}

#[test]
fn given_garbage_bytes_when_decoding_then_reports_unsupported_format() {
    let file = write_temp_wav(&vec![0xFFu8; 128]);

    let result = decode_audio_file(file.path());

    assert!(matches!(
        result,
        Err(TranscriptionEngineError::UnsupportedFormat(_))
    ));
}

#[test]
fn given_missing_file_when_decoding_then_reports_decoding_failure() {
    let result = decode_audio_file(std::path::Path::new("/nonexistent/audio.wav"));

    assert!(matches!(
        result,
        Err(TranscriptionEngineError::DecodingFailed(_))
    ));
}
