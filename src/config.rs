use crate::domain::ModelVariant;

/// Runtime settings for the CLI, read from the process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Model tier used when no variant is given on the command line.
    pub model: ModelVariant,
    /// Reuse loaded models across files instead of reloading per call.
    pub cache_models: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        let model = std::env::var("WHISPER_MODEL")
            .map(ModelVariant::new)
            .unwrap_or_default();
        let cache_models = std::env::var("CACHE_MODELS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            model,
            cache_models,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: ModelVariant::default(),
            cache_models: false,
        }
    }
}
