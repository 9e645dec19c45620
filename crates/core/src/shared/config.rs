use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::caption_error::CaptionError;
use crate::shared::constants::{WHISPER_MODEL_BASE_URL, WHISPER_MODEL_NAME};

/// Runtime configuration shared by the CLI and the server.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionerConfig {
    /// Staging area for uploaded videos. Always cleaned per request.
    pub upload_dir: PathBuf,
    /// Durable area holding successfully muxed videos and SRT downloads.
    pub output_dir: PathBuf,
    pub ffmpeg_path: PathBuf,
    /// Explicit model file; skips cache lookup and download when set.
    pub model_path: Option<PathBuf>,
    pub model_name: String,
    pub model_base_url: String,
    /// Inference threads, 0 = min(available cores, 4).
    pub threads: u32,
    pub drop_empty_segments: bool,
}

impl Default for CaptionerConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("outputs"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            model_path: None,
            model_name: WHISPER_MODEL_NAME.to_string(),
            model_base_url: WHISPER_MODEL_BASE_URL.to_string(),
            threads: 0,
            drop_empty_segments: false,
        }
    }
}

impl CaptionerConfig {
    pub fn load(path: &Path) -> Result<Self, CaptionError> {
        let json = fs::read_to_string(path)
            .map_err(|e| CaptionError::io("failed to read config", path, e))?;
        serde_json::from_str(&json).map_err(|e| {
            CaptionError::InvalidInput(format!("config {} is not valid: {e}", path.display()))
        })
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CaptionError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_service_layout() {
        let config = CaptionerConfig::default();
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert_eq!(config.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.model_name, "ggml-small.bin");
        assert!(!config.drop_empty_segments);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("captioner.json");
        fs::write(&path, r#"{"output_dir": "/srv/captions", "threads": 2}"#).unwrap();

        let config = CaptionerConfig::load(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/srv/captions"));
        assert_eq!(config.threads, 2);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn test_malformed_file_is_invalid_input() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("captioner.json");
        fs::write(&path, "{ not json").unwrap();

        let err = CaptionerConfig::load(&path).unwrap_err();
        assert!(matches!(err, CaptionError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CaptionerConfig::load(Path::new("/nonexistent/captioner.json")).unwrap_err();
        assert!(matches!(err, CaptionError::Io { .. }));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(
            CaptionerConfig::load_or_default(None).unwrap(),
            CaptionerConfig::default()
        );
    }
}
