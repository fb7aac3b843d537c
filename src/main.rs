use std::sync::Arc;

use skald::application::ports::{FileAttributes, TranscriptionEngine};
use skald::application::services::TranscriptionAdapter;
use skald::config::Settings;
use skald::domain::ModelVariant;
use skald::infrastructure::audio::{CachingTranscriptionEngine, CandleWhisperEngine};
use skald::infrastructure::fs::LocalFileProcessor;
use skald::infrastructure::observability::{init_tracing, TracingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(TracingConfig::default());

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        anyhow::bail!("usage: skald <audio-file> [model-variant]");
    };

    let settings = Settings::from_env();
    let model = args.next().map(ModelVariant::new).unwrap_or(settings.model);

    let engine: Arc<dyn TranscriptionEngine> = {
        let base: Arc<dyn TranscriptionEngine> = Arc::new(CandleWhisperEngine::new());
        if settings.cache_models {
            Arc::new(CachingTranscriptionEngine::new(base))
        } else {
            base
        }
    };

    let processor = LocalFileProcessor::new(&path);
    let mut adapter = TranscriptionAdapter::new(processor, engine).with_model(model);

    adapter.process().await?;

    println!("{}", serde_json::to_string_pretty(adapter.metadata())?);

    Ok(())
}
