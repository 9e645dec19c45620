use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::shared::caption_error::CaptionError;
use crate::shared::constants::{SUBTITLE_LANGUAGE, WHISPER_SAMPLE_RATE};

const TOOL: &str = "ffmpeg";

/// One-shot invocations of the external `ffmpeg` binary.
///
/// Each call runs to completion with stdout discarded and stderr captured.
/// A non-zero exit becomes [`CaptionError::ExternalTool`] carrying stderr
/// verbatim. Nothing is retried.
#[derive(Clone, Debug)]
pub struct FfmpegCommand {
    binary: PathBuf,
}

impl FfmpegCommand {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn run(&self, args: &[OsString]) -> Result<(), CaptionError> {
        log::debug!("Running {} {:?}", self.binary.display(), args);

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| CaptionError::ExternalTool {
                tool: TOOL.to_string(),
                stderr: format!("failed to launch {}: {e}", self.binary.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            log::warn!("{TOOL} exited with {}", output.status);
            return Err(CaptionError::ExternalTool {
                tool: TOOL.to_string(),
                stderr,
            });
        }
        Ok(())
    }
}

impl Default for FfmpegCommand {
    fn default() -> Self {
        Self::new(TOOL)
    }
}

/// `-y -i <video> -vn -acodec pcm_s16le -ar 16000 -ac 1 <audio>`
pub fn extract_audio_args(video: &Path, out_audio: &Path) -> Vec<OsString> {
    let sample_rate = WHISPER_SAMPLE_RATE.to_string();
    let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), video.into()];
    args.extend(
        ["-vn", "-acodec", "pcm_s16le", "-ar", sample_rate.as_str(), "-ac", "1"].map(OsString::from),
    );
    args.push(out_audio.into());
    args
}

/// `-y -i <video> -i <srt> -c:v copy -c:a copy -c:s srt -metadata:s:s:0 language=eng <output>`
pub fn mux_subtitle_args(video: &Path, subtitle: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-y".into(),
        "-i".into(),
        video.into(),
        "-i".into(),
        subtitle.into(),
    ];
    let language = format!("language={SUBTITLE_LANGUAGE}");
    args.extend(
        [
            "-c:v",
            "copy",
            "-c:a",
            "copy",
            "-c:s",
            "srt",
            "-metadata:s:s:0",
            language.as_str(),
        ]
        .map(OsString::from),
    );
    args.push(output.into());
    args
}
