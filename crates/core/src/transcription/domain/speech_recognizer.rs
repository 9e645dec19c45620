use std::path::Path;

use crate::shared::caption_error::CaptionError;

use super::transcription_task::TranscriptionTask;

/// One timed span exactly as the engine reported it.
#[derive(Clone, Debug, PartialEq)]
pub struct RawSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTranscript {
    /// Detected source language, if the engine reports one.
    pub language: Option<String>,
    pub segments: Vec<RawSegment>,
}

/// Domain interface for speech-to-text over a 16 kHz mono WAV file.
///
/// Implementations hold mutable inference state and are not expected to
/// tolerate parallel calls; share them through `SerializedRecognizer`.
/// A call is all-or-nothing: no partial transcript on failure.
pub trait SpeechRecognizer: Send {
    fn transcribe(
        &self,
        audio_path: &Path,
        task: TranscriptionTask,
    ) -> Result<RawTranscript, CaptionError>;
}
