use std::fmt;

/// What the speech engine should produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TranscriptionTask {
    /// Text in the spoken language.
    Transcribe,
    /// English text whatever the spoken language.
    #[default]
    Translate,
}

impl TranscriptionTask {
    /// Unknown values fall back to `Translate`, the service default.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "transcribe" => TranscriptionTask::Transcribe,
            _ => TranscriptionTask::Translate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionTask::Transcribe => "transcribe",
            TranscriptionTask::Translate => "translate",
        }
    }

    pub fn is_translate(&self) -> bool {
        matches!(self, TranscriptionTask::Translate)
    }

    /// Captions-only requests always get English captions: `Transcribe` is
    /// upgraded to `Translate`. Product rule, not a parsing fallback.
    pub fn for_captions_only(self) -> Self {
        TranscriptionTask::Translate
    }
}

impl fmt::Display for TranscriptionTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
