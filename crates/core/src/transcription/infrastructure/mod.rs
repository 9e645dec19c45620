pub mod serialized_recognizer;
pub mod wav_loader;
pub mod whisper_recognizer;
