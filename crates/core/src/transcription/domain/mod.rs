pub mod pcm_audio;
pub mod speech_recognizer;
pub mod transcription_result;
pub mod transcription_task;
