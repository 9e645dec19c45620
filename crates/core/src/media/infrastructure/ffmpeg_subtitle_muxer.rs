use std::path::Path;

use crate::media::domain::subtitle_muxer::SubtitleMuxer;
use crate::media::infrastructure::ffmpeg_command::{mux_subtitle_args, FfmpegCommand};
use crate::shared::caption_error::CaptionError;

/// Remuxes a video with an SRT track using the external `ffmpeg` tool.
///
/// Streams are stream-copied; if the container rejects a copied codec the
/// tool fails and no re-encode is attempted.
pub struct FfmpegSubtitleMuxer {
    ffmpeg: FfmpegCommand,
}

impl FfmpegSubtitleMuxer {
    pub fn new(ffmpeg: FfmpegCommand) -> Self {
        Self { ffmpeg }
    }
}

impl SubtitleMuxer for FfmpegSubtitleMuxer {
    fn mux(&self, video: &Path, subtitle: &Path, output: &Path) -> Result<(), CaptionError> {
        for input in [video, subtitle] {
            if !input.is_file() {
                return Err(CaptionError::InvalidInput(format!(
                    "mux input not found: {}",
                    input.display()
                )));
            }
        }
        self.ffmpeg.run(&mux_subtitle_args(video, subtitle, output))
    }
}
