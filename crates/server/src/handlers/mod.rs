mod captions;
mod download;
mod health;
mod upload;

pub use captions::{
    generate_captions_handler, generate_video_handler, CaptionsResponse, VideoResponse,
};
pub use download::{download_handler, download_srt_handler, SrtDownloadRequest};
pub use health::{health_handler, index_handler, HealthResponse};
