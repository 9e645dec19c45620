//! Stub adapters shared by the pipeline tests.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::media::domain::audio_extractor::AudioExtractor;
use crate::media::domain::subtitle_muxer::SubtitleMuxer;
use crate::shared::caption_error::CaptionError;
use crate::transcription::domain::speech_recognizer::{RawSegment, RawTranscript, SpeechRecognizer};
use crate::transcription::domain::transcription_task::TranscriptionTask;
use crate::transcription::infrastructure::serialized_recognizer::SerializedRecognizer;

/// Copies the video bytes into the audio file, or fails like ffmpeg would.
pub struct StubExtractor {
    pub fail: bool,
}

impl AudioExtractor for StubExtractor {
    fn extract_audio(&self, video: &Path, out_audio: &Path) -> Result<(), CaptionError> {
        if self.fail {
            return Err(CaptionError::ExternalTool {
                tool: "ffmpeg".into(),
                stderr: "Invalid data found when processing input".into(),
            });
        }
        fs::copy(video, out_audio)
            .map(|_| ())
            .map_err(|e| CaptionError::io("copy", out_audio, e))
    }
}

/// Turns the "audio" file content into one segment and records every call.
pub struct StubRecognizer {
    pub calls: Arc<Mutex<Vec<TranscriptionTask>>>,
    pub segments: Option<Vec<RawSegment>>,
}

impl StubRecognizer {
    pub fn echo() -> (Self, Arc<Mutex<Vec<TranscriptionTask>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                calls: calls.clone(),
                segments: None,
            },
            calls,
        )
    }

    pub fn with_segments(segments: Vec<RawSegment>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            segments: Some(segments),
        }
    }
}

impl SpeechRecognizer for StubRecognizer {
    fn transcribe(
        &self,
        audio_path: &Path,
        task: TranscriptionTask,
    ) -> Result<RawTranscript, CaptionError> {
        self.calls.lock().unwrap().push(task);
        let segments = match &self.segments {
            Some(segments) => segments.clone(),
            None => {
                let text = fs::read_to_string(audio_path)
                    .map_err(|e| CaptionError::Engine(e.to_string()))?;
                vec![RawSegment {
                    start: 0.0,
                    end: 1.5,
                    text,
                }]
            }
        };
        Ok(RawTranscript {
            language: Some("fr".into()),
            segments,
        })
    }
}

pub struct FailingRecognizer;

impl SpeechRecognizer for FailingRecognizer {
    fn transcribe(&self, _: &Path, _: TranscriptionTask) -> Result<RawTranscript, CaptionError> {
        Err(CaptionError::Engine("out of memory".into()))
    }
}

/// Writes a fake container, then optionally fails after the partial write.
pub struct StubMuxer {
    pub fail_after_write: bool,
}

impl SubtitleMuxer for StubMuxer {
    fn mux(&self, video: &Path, subtitle: &Path, output: &Path) -> Result<(), CaptionError> {
        let srt = fs::read_to_string(subtitle).map_err(|e| CaptionError::io("read", subtitle, e))?;
        let mut container = fs::read(video).map_err(|e| CaptionError::io("read", video, e))?;
        container.extend_from_slice(srt.as_bytes());
        fs::write(output, &container).map_err(|e| CaptionError::io("write", output, e))?;
        if self.fail_after_write {
            return Err(CaptionError::ExternalTool {
                tool: "ffmpeg".into(),
                stderr: "Could not write header".into(),
            });
        }
        Ok(())
    }
}

pub fn serialized(recognizer: impl SpeechRecognizer + 'static) -> Arc<SerializedRecognizer> {
    Arc::new(SerializedRecognizer::new(Box::new(recognizer)))
}
