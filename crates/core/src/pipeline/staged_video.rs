use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::shared::caption_error::CaptionError;
use crate::shared::file_name;

/// The input video of one request.
///
/// Uploads are written to the upload area under a unique name and deleted
/// when the guard drops, whatever the outcome of the request. Files the
/// caller already owns (CLI input) are borrowed and never deleted.
#[derive(Debug)]
pub struct StagedVideo {
    path: PathBuf,
    original_name: String,
    owned: bool,
}

impl StagedVideo {
    /// Validate the client's file name and persist `bytes` in `upload_dir`.
    #[cfg(test)]
    pub(crate) fn stage_bytes(
        upload_dir: &Path,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<Self, CaptionError> {
        use std::io::Write;

        let (staged, mut file) = Self::create(upload_dir, original_name)?;
        file.write_all(bytes)
            .map_err(|e| CaptionError::io("failed to write upload", staged.path(), e))?;
        log::debug!("Staged {} bytes at {}", bytes.len(), staged.path().display());
        Ok(staged)
    }

    /// Validate the client's file name and reserve a unique empty file in
    /// `upload_dir` for the caller to write the upload into.
    ///
    /// The guard owns the file from here on, so it is removed even if the
    /// caller fails halfway through writing.
    pub fn create(upload_dir: &Path, original_name: &str) -> Result<(Self, File), CaptionError> {
        let name = file_name::validate_video_name(original_name)?;
        fs::create_dir_all(upload_dir)
            .map_err(|e| CaptionError::io("failed to create upload directory", upload_dir, e))?;

        let (stem, ext) = split_name(&name);
        let (file, path) = tempfile::Builder::new()
            .prefix(&format!("{stem}-"))
            .suffix(&format!(".{ext}"))
            .tempfile_in(upload_dir)
            .map_err(|e| CaptionError::io("failed to stage upload", upload_dir, e))?
            .keep()
            .map_err(|e| CaptionError::io("failed to keep upload", upload_dir, e.error))?;
        log::debug!("Staging upload {name} at {}", path.display());

        let staged = Self {
            path,
            original_name: name,
            owned: true,
        };
        Ok((staged, file))
    }

    /// Use a caller-owned file in place. The file is validated but left
    /// untouched when the guard drops.
    pub fn external(path: &Path) -> Result<Self, CaptionError> {
        let raw_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let name = file_name::validate_video_name(raw_name)?;
        if !path.is_file() {
            return Err(CaptionError::InvalidInput(format!(
                "video file not found: {}",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
            original_name: name,
            owned: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sanitized client-facing name, used to derive output names.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }
}

impl Drop for StagedVideo {
    fn drop(&mut self) {
        if !self.owned {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed staged upload {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove staged upload {}: {e}", self.path.display()),
        }
    }
}

fn split_name(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => (name, ""),
    }
}
