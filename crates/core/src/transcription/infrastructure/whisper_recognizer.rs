use std::path::Path;

use crate::shared::caption_error::CaptionError;
use crate::transcription::domain::speech_recognizer::{RawTranscript, SpeechRecognizer};
use crate::transcription::domain::transcription_task::TranscriptionTask;

#[cfg(feature = "whisper")]
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

#[cfg(feature = "whisper")]
use crate::transcription::infrastructure::wav_loader::load_wav;

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// The model is loaded once in [`WhisperRecognizer::new`] and reused for
/// every request. Language is auto-detected; `Translate` asks Whisper for
/// English output.
pub struct WhisperRecognizer {
    threads: u32,
    #[cfg(feature = "whisper")]
    context: WhisperContext,
}

impl WhisperRecognizer {
    /// Load the model. `threads == 0` picks min(available cores, 4).
    #[cfg(feature = "whisper")]
    pub fn new(model_path: &Path, threads: u32) -> Result<Self, CaptionError> {
        ensure_model_exists(model_path)?;
        let path_str = model_path
            .to_str()
            .ok_or_else(|| CaptionError::Engine("model path is not valid UTF-8".to_string()))?;

        log::info!("Loading Whisper model from {}", model_path.display());
        let context = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| CaptionError::Engine(format!("failed to load Whisper model: {e}")))?;
        log::info!("Whisper model loaded");

        Ok(Self {
            threads,
            context,
        })
    }

    #[cfg(not(feature = "whisper"))]
    pub fn new(model_path: &Path, _threads: u32) -> Result<Self, CaptionError> {
        ensure_model_exists(model_path)?;
        Err(CaptionError::Engine(
            "built without Whisper support; rebuild with `--features whisper`".to_string(),
        ))
    }

    pub fn threads(&self) -> u32 {
        effective_threads(self.threads)
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    #[cfg(feature = "whisper")]
    fn transcribe(
        &self,
        audio_path: &Path,
        task: TranscriptionTask,
    ) -> Result<RawTranscript, CaptionError> {
        use crate::transcription::domain::speech_recognizer::RawSegment;

        let audio = load_wav(audio_path)?;
        log::debug!("Transcribing {:.1}s of audio ({task})", audio.duration());

        let mut state = self
            .context
            .create_state()
            .map_err(|e| CaptionError::Engine(format!("failed to create Whisper state: {e}")))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some("auto"));
        params.set_translate(task.is_translate());
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(self.threads() as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| CaptionError::Engine(format!("Whisper inference failed: {e}")))?;

        let language = whisper_rs::get_lang_str(state.full_lang_id_from_state()).map(str::to_string);

        let mut segments = Vec::new();
        for seg_idx in 0..state.full_n_segments() {
            let Some(segment) = state.get_segment(seg_idx) else {
                continue;
            };
            let text = segment
                .to_str_lossy()
                .map_err(|e| CaptionError::Engine(format!("unreadable segment text: {e}")))?;

            // Segment timestamps are in centiseconds (10ms units)
            segments.push(RawSegment {
                start: segment.start_timestamp() as f64 / 100.0,
                end: segment.end_timestamp() as f64 / 100.0,
                text: text.to_string(),
            });
        }

        Ok(RawTranscript { language, segments })
    }

    #[cfg(not(feature = "whisper"))]
    fn transcribe(&self, _: &Path, _: TranscriptionTask) -> Result<RawTranscript, CaptionError> {
        Err(CaptionError::Engine(
            "built without Whisper support; rebuild with `--features whisper`".to_string(),
        ))
    }
}

fn ensure_model_exists(model_path: &Path) -> Result<(), CaptionError> {
    if !model_path.exists() {
        return Err(CaptionError::Engine(format!(
            "Whisper model not found at: {}",
            model_path.display()
        )));
    }
    Ok(())
}

fn effective_threads(configured: u32) -> u32 {
    if configured > 0 {
        return configured;
    }
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
        .min(4)
}
