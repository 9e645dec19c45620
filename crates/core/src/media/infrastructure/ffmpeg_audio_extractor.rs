use std::path::Path;

use crate::media::domain::audio_extractor::AudioExtractor;
use crate::media::infrastructure::ffmpeg_command::{extract_audio_args, FfmpegCommand};
use crate::shared::caption_error::CaptionError;

/// Extracts 16 kHz mono PCM audio with the external `ffmpeg` tool.
pub struct FfmpegAudioExtractor {
    ffmpeg: FfmpegCommand,
}

impl FfmpegAudioExtractor {
    pub fn new(ffmpeg: FfmpegCommand) -> Self {
        Self { ffmpeg }
    }
}

impl AudioExtractor for FfmpegAudioExtractor {
    fn extract_audio(&self, video: &Path, out_audio: &Path) -> Result<(), CaptionError> {
        if !video.is_file() {
            return Err(CaptionError::InvalidInput(format!(
                "video file not found: {}",
                video.display()
            )));
        }
        self.ffmpeg.run(&extract_audio_args(video, out_audio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_video_is_invalid_input_without_running_tool() {
        let extractor = FfmpegAudioExtractor::new(FfmpegCommand::new("/nonexistent/ffmpeg"));
        let err = extractor
            .extract_audio(Path::new("/nonexistent/clip.mp4"), Path::new("/tmp/audio.wav"))
            .unwrap_err();
        assert!(matches!(err, CaptionError::InvalidInput(_)));
    }

    #[test]
    fn test_tool_failure_surfaces_as_external_tool() {
        let tmp = tempfile::TempDir::new().unwrap();
        let video = tmp.path().join("clip.mp4");
        std::fs::write(&video, b"not really a video").unwrap();

        let extractor = FfmpegAudioExtractor::new(FfmpegCommand::new("/nonexistent/ffmpeg"));
        let err = extractor
            .extract_audio(&video, &tmp.path().join("audio.wav"))
            .unwrap_err();
        assert!(matches!(err, CaptionError::ExternalTool { .. }));
    }
}
