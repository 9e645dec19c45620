use std::path::Path;

use crate::shared::caption_error::CaptionError;
use crate::shared::constants::{OUTPUT_EXTENSION, OUTPUT_SUFFIX, VIDEO_EXTENSIONS};

/// Reduce a client-supplied file name to a safe single path component.
///
/// Path separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9._-]` is dropped and leading/trailing `.`/`_` are
/// trimmed, so the result can never climb out of its directory.
pub fn sanitize(name: &str) -> Result<String, CaptionError> {
    let spaced = name.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        return Err(CaptionError::InvalidInput(format!(
            "file name '{name}' has no usable characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn is_allowed_video(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Validate an uploaded video's name and return its sanitized form.
pub fn validate_video_name(name: &str) -> Result<String, CaptionError> {
    if name.trim().is_empty() {
        return Err(CaptionError::InvalidInput("No file selected".to_string()));
    }
    if !is_allowed_video(name) {
        return Err(CaptionError::InvalidInput(format!(
            "Invalid file type: '{name}' (allowed: {})",
            VIDEO_EXTENSIONS.join(", ")
        )));
    }
    sanitize(name)
}

/// `clip.mp4` → `clip_with_captions.mkv`.
pub fn output_name_for(video_name: &str) -> String {
    let stem = Path::new(video_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(video_name);
    format!("{stem}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}")
}
