use crate::shared::caption_error::CaptionError;
use crate::shared::constants::UNKNOWN_LANGUAGE;
use crate::subtitle::domain::segment::Segment;
use crate::subtitle::domain::subtitle_document::SubtitleDocument;

use super::speech_recognizer::RawTranscript;

/// Validated engine output for one request.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptionResult {
    language: String,
    document: SubtitleDocument,
}

impl TranscriptionResult {
    pub fn new(language: impl Into<String>, document: SubtitleDocument) -> Self {
        Self {
            language: language.into(),
            document,
        }
    }

    /// Build segments from raw engine output, keeping emission order.
    ///
    /// A segment the engine emitted with impossible bounds fails the whole
    /// transcript as an engine error.
    pub fn from_raw(raw: RawTranscript) -> Result<Self, CaptionError> {
        let language = raw
            .language
            .filter(|lang| !lang.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());
        let segments = raw
            .segments
            .iter()
            .map(|s| Segment::new(s.start, s.end, &s.text))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CaptionError::Engine(e.to_string()))?;
        Ok(Self::new(language, SubtitleDocument::new(segments)))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn document(&self) -> &SubtitleDocument {
        &self.document
    }

    pub fn into_document(self) -> SubtitleDocument {
        self.document
    }
}
