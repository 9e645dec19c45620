pub const WHISPER_MODEL_NAME: &str = "ggml-small.bin";
pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm", "flv", "wmv"];

/// Name of the extracted audio inside a request's scratch directory.
pub const AUDIO_FILENAME: &str = "audio.wav";
/// Name of the subtitle file written for muxing, and of SRT downloads.
pub const SUBTITLE_FILENAME: &str = "captions.srt";

/// Appended to the original stem to name a muxed output video.
pub const OUTPUT_SUFFIX: &str = "_with_captions";
pub const OUTPUT_EXTENSION: &str = "mkv";
pub const OUTPUT_MIME_TYPE: &str = "video/x-matroska";

/// ISO 639-2 tag written on the embedded subtitle stream.
pub const SUBTITLE_LANGUAGE: &str = "eng";

pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Lines of SRT shown in the end-of-request log preview.
pub const CAPTION_PREVIEW_LINES: usize = 15;
