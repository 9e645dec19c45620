pub mod ffmpeg_audio_extractor;
pub mod ffmpeg_command;
pub mod ffmpeg_subtitle_muxer;
