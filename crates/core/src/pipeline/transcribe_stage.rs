use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tempfile::TempDir;

use crate::media::domain::audio_extractor::AudioExtractor;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::caption_error::CaptionError;
use crate::shared::constants::AUDIO_FILENAME;
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::transcription_result::TranscriptionResult;
use crate::transcription::domain::transcription_task::TranscriptionTask;
use crate::transcription::infrastructure::serialized_recognizer::SerializedRecognizer;

/// Shared front half of both workflows: video → audio → transcript.
#[derive(Clone)]
pub struct TranscribeStage {
    extractor: Arc<dyn AudioExtractor>,
    recognizer: Arc<SerializedRecognizer>,
}

impl TranscribeStage {
    pub fn new(extractor: Arc<dyn AudioExtractor>, recognizer: Arc<SerializedRecognizer>) -> Self {
        Self {
            extractor,
            recognizer,
        }
    }

    /// Request-scoped scratch directory, removed with everything in it when
    /// the returned handle drops.
    pub fn scratch_dir() -> Result<TempDir, CaptionError> {
        tempfile::Builder::new()
            .prefix("captioner-")
            .tempdir()
            .map_err(|e| CaptionError::io("failed to create scratch directory", std::env::temp_dir(), e))
    }

    /// Extract the audio of `video` into `scratch` and transcribe it.
    pub fn run(
        &self,
        video: &Path,
        scratch: &Path,
        task: TranscriptionTask,
        logger: &mut dyn PipelineLogger,
    ) -> Result<TranscriptionResult, CaptionError> {
        let audio_path = scratch.join(AUDIO_FILENAME);

        let t = Instant::now();
        self.extractor.extract_audio(video, &audio_path)?;
        logger.timing("extract", t.elapsed().as_secs_f64() * 1000.0);
        if let Ok(meta) = std::fs::metadata(&audio_path) {
            logger.metric("audio_bytes", meta.len() as f64);
        }

        let t = Instant::now();
        let raw = self.recognizer.transcribe(&audio_path, task)?;
        logger.timing("transcribe", t.elapsed().as_secs_f64() * 1000.0);

        let result = TranscriptionResult::from_raw(raw)?;
        logger.metric("segments", result.document().len() as f64);
        logger.info(&format!(
            "Transcribed {} segments ({task}, language: {})",
            result.document().len(),
            result.language()
        ));
        Ok(result)
    }
}
