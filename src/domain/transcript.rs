/// Result of one transcription run: the recognized text and the detected
/// language code. Short-lived; folded into [`Metadata`](super::Metadata)
/// right after production.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub language: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }
}
