use std::path::Path;

use crate::shared::caption_error::CaptionError;

/// Domain interface for attaching an SRT file to a video as a soft
/// subtitle track.
///
/// Video and audio streams are copied bit-exact; the subtitle becomes
/// stream 0 tagged with language `eng`. `output` is overwritten.
pub trait SubtitleMuxer: Send + Sync {
    fn mux(&self, video: &Path, subtitle: &Path, output: &Path) -> Result<(), CaptionError>;
}
