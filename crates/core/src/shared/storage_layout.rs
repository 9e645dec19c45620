use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::shared::caption_error::CaptionError;
use crate::shared::config::CaptionerConfig;
use crate::shared::constants::SUBTITLE_FILENAME;
use crate::shared::file_name;

/// The two on-disk areas the service owns.
///
/// The upload area only ever holds files of in-flight requests; the output
/// area only holds completed artifacts offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    upload_dir: PathBuf,
    output_dir: PathBuf,
}

impl StorageLayout {
    pub fn new(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn from_config(config: &CaptionerConfig) -> Self {
        Self::new(&config.upload_dir, &config.output_dir)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn ensure_dirs(&self) -> Result<(), CaptionError> {
        for dir in [&self.upload_dir, &self.output_dir] {
            fs::create_dir_all(dir)
                .map_err(|e| CaptionError::io("failed to create directory", dir, e))?;
        }
        Ok(())
    }

    pub fn output_path(&self, output_name: &str) -> PathBuf {
        self.output_dir.join(output_name)
    }

    /// Resolve a download request to a file in the output area.
    pub fn locate_output(&self, requested: &str) -> Result<PathBuf, CaptionError> {
        let name = file_name::sanitize(requested)
            .map_err(|_| CaptionError::NotFound(requested.to_string()))?;
        let path = self.output_dir.join(&name);
        if !path.is_file() {
            return Err(CaptionError::NotFound(name));
        }
        Ok(path)
    }

    /// Write user-supplied SRT text to the output area for download.
    ///
    /// The file is written under a temporary name and renamed into place so
    /// concurrent writers never expose a torn file.
    pub fn write_srt_download(&self, content: &str) -> Result<PathBuf, CaptionError> {
        if content.is_empty() {
            return Err(CaptionError::InvalidInput(
                "No SRT content provided".to_string(),
            ));
        }
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| CaptionError::io("failed to create directory", &self.output_dir, e))?;

        let dest = self.output_dir.join(SUBTITLE_FILENAME);
        let mut tmp = tempfile::NamedTempFile::new_in(&self.output_dir)
            .map_err(|e| CaptionError::io("failed to create SRT file", &self.output_dir, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| CaptionError::io("failed to write SRT file", tmp.path(), e))?;
        tmp.persist(&dest)
            .map_err(|e| CaptionError::io("failed to write SRT file", &dest, e.error))?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout(tmp: &TempDir) -> StorageLayout {
        StorageLayout::new(tmp.path().join("uploads"), tmp.path().join("outputs"))
    }

    #[test]
    fn test_ensure_dirs_creates_both_areas() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);
        layout.ensure_dirs().unwrap();
        assert!(layout.upload_dir().is_dir());
        assert!(layout.output_dir().is_dir());
    }

    #[test]
    fn test_from_config_uses_configured_dirs() {
        let config = CaptionerConfig {
            upload_dir: "/a".into(),
            output_dir: "/b".into(),
            ..CaptionerConfig::default()
        };
        let layout = StorageLayout::from_config(&config);
        assert_eq!(layout.upload_dir(), Path::new("/a"));
        assert_eq!(layout.output_dir(), Path::new("/b"));
    }

    #[test]
    fn test_locate_existing_output() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);
        layout.ensure_dirs().unwrap();
        fs::write(layout.output_path("clip_with_captions.mkv"), b"mkv").unwrap();

        let path = layout.locate_output("clip_with_captions.mkv").unwrap();
        assert_eq!(path, layout.output_path("clip_with_captions.mkv"));
    }

    #[test]
    fn test_locate_missing_output_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);
        layout.ensure_dirs().unwrap();

        let err = layout.locate_output("nope.mkv").unwrap_err();
        assert!(matches!(err, CaptionError::NotFound(_)));
    }

    #[test]
    fn test_locate_cannot_escape_output_dir() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);
        layout.ensure_dirs().unwrap();
        fs::write(tmp.path().join("secret.txt"), b"x").unwrap();

        let err = layout.locate_output("../secret.txt").unwrap_err();
        assert!(matches!(err, CaptionError::NotFound(_)));
    }

    #[test]
    fn test_write_srt_download() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);

        let path = layout.write_srt_download("1\n00:00:00,000 --> 00:00:01,000\nHi\n\n").unwrap();
        assert!(path.ends_with("captions.srt"));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "1\n00:00:00,000 --> 00:00:01,000\nHi\n\n"
        );
    }

    #[test]
    fn test_write_empty_srt_is_invalid_input() {
        let tmp = TempDir::new().unwrap();
        let err = layout(&tmp).write_srt_download("").unwrap_err();
        assert!(matches!(err, CaptionError::InvalidInput(_)));
    }
}
