pub mod audio_extractor;
pub mod subtitle_muxer;
