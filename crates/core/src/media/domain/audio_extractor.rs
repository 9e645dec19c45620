use std::path::Path;

use crate::shared::caption_error::CaptionError;

/// Domain interface for pulling the speech track out of a video.
///
/// Implementations write 16 kHz mono signed 16-bit PCM WAV to `out_audio`,
/// overwriting any existing file.
pub trait AudioExtractor: Send + Sync {
    fn extract_audio(&self, video: &Path, out_audio: &Path) -> Result<(), CaptionError>;
}
