use std::fmt;

use serde::{Deserialize, Serialize};

/// Named transcription model tier, trading accuracy against speed.
///
/// The name is carried verbatim and is not validated here; an unknown
/// variant only fails once an engine attempts to load it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelVariant(String);

impl ModelVariant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelVariant {
    fn default() -> Self {
        Self("base".to_string())
    }
}

impl From<&str> for ModelVariant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
