use std::path::PathBuf;

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use tokio::io::AsyncWriteExt;

use captioner_core::pipeline::staged_video::StagedVideo;
use captioner_core::shared::caption_error::CaptionError;

use crate::error::ApiError;

/// Fields of the multipart form shared by both caption endpoints.
///
/// The video part is written to the upload area chunk by chunk as it
/// arrives; only the small text fields are held in memory.
#[derive(Default)]
pub(crate) struct UploadForm {
    pub video: Option<StagedVideo>,
    pub task: Option<String>,
    pub style: Option<String>,
}

impl UploadForm {
    pub async fn read(
        mut multipart: Multipart,
        upload_dir: PathBuf,
        context: &str,
    ) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read multipart: {e}")))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("video") => {
                    form.video = Some(stage_field(field, upload_dir.clone(), context).await?);
                }
                Some("task") => form.task = Some(read_text(field).await?),
                Some("style") => form.style = Some(read_text(field).await?),
                _ => {}
            }
        }
        Ok(form)
    }

    /// The uploaded video, or the 400 the original service answers with.
    pub fn take_video(&mut self) -> Result<StagedVideo, ApiError> {
        self.video
            .take()
            .ok_or_else(|| ApiError::bad_request("No video file uploaded"))
    }
}

async fn stage_field(
    mut field: Field<'_>,
    upload_dir: PathBuf,
    context: &str,
) -> Result<StagedVideo, ApiError> {
    let caption_err = |e: CaptionError| ApiError::from_caption(context, e);
    let file_name = field.file_name().unwrap_or_default().to_string();
    let (staged, file) =
        tokio::task::spawn_blocking(move || StagedVideo::create(&upload_dir, &file_name))
            .await
            .map_err(|e| ApiError::internal(format!("{context}: {e}")))?
            .map_err(caption_err)?;

    let mut out = tokio::fs::File::from_std(file);
    let mut written: u64 = 0;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?
    {
        out.write_all(&chunk)
            .await
            .map_err(|e| caption_err(CaptionError::io("failed to write upload", staged.path(), e)))?;
        written += chunk.len() as u64;
    }
    out.flush()
        .await
        .map_err(|e| caption_err(CaptionError::io("failed to write upload", staged.path(), e)))?;

    log::debug!(
        "Received upload {} ({written} bytes) at {}",
        staged.original_name(),
        staged.path().display()
    );
    Ok(staged)
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read form field: {e}")))
}
