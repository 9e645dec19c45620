use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use captioner_core::shared::constants::{OUTPUT_MIME_TYPE, SUBTITLE_FILENAME};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SrtDownloadRequest {
    #[serde(default)]
    pub srt_content: String,
}

/// `GET /download/{filename}`: a remuxed video from the output area.
pub async fn download_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .service
        .layout()
        .locate_output(&filename)
        .map_err(|e| ApiError::from_caption("Failed to download file", e))?;
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to download file: {e}")))?;
    let len = file
        .metadata()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to download file: {e}")))?
        .len();

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename.as_str());
    log::info!("Downloading {name} ({len} bytes)");

    let body = Body::from_stream(ReaderStream::new(file));
    let mut response = attachment(body, OUTPUT_MIME_TYPE, name);
    response
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    Ok(response)
}

/// `POST /download-srt`: echo caller-supplied SRT text back as a file.
pub async fn download_srt_handler(
    State(state): State<AppState>,
    Json(request): Json<SrtDownloadRequest>,
) -> Result<Response, ApiError> {
    let content = request.srt_content;
    let service = state.service.clone();
    let written = content.clone();
    tokio::task::spawn_blocking(move || service.layout().write_srt_download(&written))
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create SRT download: {e}")))?
        .map_err(|e| ApiError::from_caption("Failed to create SRT download", e))?;

    Ok(attachment(Body::from(content), "text/plain; charset=utf-8", SUBTITLE_FILENAME))
}

fn attachment(body: Body, content_type: &str, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}
