use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            message: "Caption generator backend is running".to_string(),
        }),
    )
}

pub async fn index_handler() -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to the Automated Caption Generator API",
        "endpoints": {
            "/health": "GET - Health check",
            "/generate-captions": "POST - Generate captions only",
            "/generate-video-with-captions": "POST - Generate video with embedded captions",
            "/download/{filename}": "GET - Download generated video",
            "/download-srt": "POST - Download SRT content as a file",
        }
    }))
}
