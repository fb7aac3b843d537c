pub mod audio_decoder;
mod caching_engine;
mod candle_whisper_engine;
mod mock_engine;

pub use caching_engine::CachingTranscriptionEngine;
pub use candle_whisper_engine::CandleWhisperEngine;
pub use mock_engine::MockTranscriptionEngine;
