use std::path::Path;

use crate::shared::caption_error::CaptionError;
use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::transcription::domain::pcm_audio::PcmAudio;

/// Load the extracted 16 kHz mono WAV as normalized f32 samples.
///
/// Only 16- and 32-bit integer PCM is accepted; anything else means the
/// extraction step produced something the engine cannot consume.
pub fn load_wav(path: &Path) -> Result<PcmAudio, CaptionError> {
    let reader = hound::WavReader::open(path).map_err(|e| {
        CaptionError::Engine(format!("failed to open audio {}: {e}", path.display()))
    })?;
    let spec = reader.spec();

    if spec.sample_rate != WHISPER_SAMPLE_RATE {
        return Err(CaptionError::Engine(format!(
            "expected {WHISPER_SAMPLE_RATE} Hz audio, got {} Hz",
            spec.sample_rate
        )));
    }
    if spec.channels != 1 {
        return Err(CaptionError::Engine(format!(
            "expected mono audio, got {} channels",
            spec.channels
        )));
    }
    if spec.sample_format != hound::SampleFormat::Int {
        return Err(CaptionError::Engine(
            "expected integer PCM audio, got float samples".to_string(),
        ));
    }

    let read_err = |e: hound::Error| CaptionError::Engine(format!("failed to read audio: {e}"));
    let samples = match spec.bits_per_sample {
        16 => reader
            .into_samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_err)?,
        32 => reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2_147_483_648.0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_err)?,
        bits => {
            return Err(CaptionError::Engine(format!(
                "unsupported bit depth: {bits}"
            )))
        }
    };

    Ok(PcmAudio::new(samples, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_wav(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for s in samples {
            writer.write_sample(*s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_loads_16_bit_mono() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("audio.wav");
        write_wav(&path, 16000, 1, &[0, 16384, -32768]);

        let audio = load_wav(&path).unwrap();
        assert_eq!(audio.sample_rate(), 16000);
        assert_eq!(audio.samples(), &[0.0, 0.5, -1.0]);
    }

    #[test]
    fn test_rejects_wrong_sample_rate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("audio.wav");
        write_wav(&path, 44100, 1, &[0; 10]);

        let err = load_wav(&path).unwrap_err();
        assert!(err.to_string().contains("44100"), "got: {err}");
    }

    #[test]
    fn test_rejects_stereo() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("audio.wav");
        write_wav(&path, 16000, 2, &[0; 10]);

        let err = load_wav(&path).unwrap_err();
        assert!(err.to_string().contains("mono"), "got: {err}");
    }

    #[test]
    fn test_missing_file_is_engine_error() {
        let err = load_wav(Path::new("/nonexistent/audio.wav")).unwrap_err();
        assert!(matches!(err, CaptionError::Engine(_)));
    }
}
