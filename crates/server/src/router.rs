use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{
    download_handler, download_srt_handler, generate_captions_handler, generate_video_handler,
    health_handler, index_handler,
};
use crate::state::AppState;

/// Default cap on a request body (uploaded video plus form fields).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;

pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/generate-captions", post(generate_captions_handler))
        .route("/generate-video-with-captions", post(generate_video_handler))
        .route("/download/{filename}", get(download_handler))
        .route("/download-srt", post(download_srt_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(state)
}
