use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use crate::shared::caption_error::CaptionError;
use crate::transcription::domain::speech_recognizer::{RawTranscript, SpeechRecognizer};
use crate::transcription::domain::transcription_task::TranscriptionTask;

/// Process-wide handle to the one loaded speech engine.
///
/// The engine carries mutable inference state, so calls are serialized by
/// a mutex held for exactly one `transcribe`. Only concurrent transcriptions
/// wait on it; extraction and muxing of other requests run freely.
pub struct SerializedRecognizer {
    engine: Mutex<Box<dyn SpeechRecognizer>>,
}

impl SerializedRecognizer {
    pub fn new(engine: Box<dyn SpeechRecognizer>) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }
}

impl SpeechRecognizer for SerializedRecognizer {
    fn transcribe(
        &self,
        audio_path: &Path,
        task: TranscriptionTask,
    ) -> Result<RawTranscript, CaptionError> {
        let queued = Instant::now();
        let engine = self
            .engine
            .lock()
            .map_err(|_| CaptionError::Engine("engine lock poisoned".to_string()))?;
        let waited_ms = queued.elapsed().as_secs_f64() * 1000.0;
        if waited_ms >= 1.0 {
            log::debug!("Waited {waited_ms:.0}ms for the transcription engine");
        }
        engine.transcribe(audio_path, task)
    }
}
