use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use captioner_core::pipeline::pipeline_logger::{LogPipelineLogger, PipelineLogger};
use captioner_core::shared::caption_error::CaptionError;
use captioner_core::subtitle::domain::caption_style::CaptionStyle;
use captioner_core::subtitle::domain::segment::Segment;
use captioner_core::transcription::domain::transcription_task::TranscriptionTask;

use super::upload::UploadForm;
use crate::error::ApiError;
use crate::state::AppState;

const CAPTIONS_CONTEXT: &str = "Failed to generate captions";
const VIDEO_CONTEXT: &str = "Failed to generate video";

#[derive(Serialize)]
pub struct CaptionsResponse {
    pub success: bool,
    pub captions: String,
    pub segments: Vec<Segment>,
    pub language_detected: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct VideoResponse {
    pub success: bool,
    pub output_filename: String,
    pub download_url: String,
    pub captions: String,
    pub segments: Vec<Segment>,
    pub language_detected: String,
    pub message: String,
}

/// `POST /generate-captions` with multipart `video`, optional `task`, `style`.
pub async fn generate_captions_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CaptionsResponse>, ApiError> {
    let upload_dir = state.service.layout().upload_dir().to_path_buf();
    let mut form = UploadForm::read(multipart, upload_dir, CAPTIONS_CONTEXT).await?;
    let video = form.take_video()?;
    let task = TranscriptionTask::parse_lenient(form.task.as_deref().unwrap_or_default());
    let style = CaptionStyle::parse_lenient(form.style.as_deref().unwrap_or_default());

    let service = state.service.clone();
    let outcome = tokio::task::spawn_blocking(move || -> Result<_, CaptionError> {
        let mut logger = LogPipelineLogger::new(video.original_name().to_string());
        let outcome = service.generate_captions(video, task, style, &mut logger);
        logger.summary();
        outcome
    })
    .await
    .map_err(|e| ApiError::internal(format!("{CAPTIONS_CONTEXT}: {e}")))?
    .map_err(|e| ApiError::from_caption(CAPTIONS_CONTEXT, e))?;

    Ok(Json(CaptionsResponse {
        success: true,
        message: outcome.message(),
        segments: outcome.segments().to_vec(),
        captions: outcome.captions,
        language_detected: outcome.language,
    }))
}

/// `POST /generate-video-with-captions` with multipart `video`, optional `task`.
pub async fn generate_video_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<VideoResponse>, ApiError> {
    let upload_dir = state.service.layout().upload_dir().to_path_buf();
    let mut form = UploadForm::read(multipart, upload_dir, VIDEO_CONTEXT).await?;
    let video = form.take_video()?;
    let task = TranscriptionTask::parse_lenient(form.task.as_deref().unwrap_or_default());

    let service = state.service.clone();
    let outcome = tokio::task::spawn_blocking(move || -> Result<_, CaptionError> {
        let mut logger = LogPipelineLogger::new(video.original_name().to_string());
        let outcome = service.embed_captions(video, task, &mut logger);
        logger.summary();
        outcome
    })
    .await
    .map_err(|e| ApiError::internal(format!("{VIDEO_CONTEXT}: {e}")))?
    .map_err(|e| ApiError::from_caption(VIDEO_CONTEXT, e))?;

    Ok(Json(VideoResponse {
        success: true,
        download_url: outcome.download_url(),
        message: outcome.message().to_string(),
        segments: outcome.segments().to_vec(),
        output_filename: outcome.output_filename,
        captions: outcome.captions,
        language_detected: outcome.language,
    }))
}
