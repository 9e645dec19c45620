pub mod caption_error;
pub mod config;
pub mod constants;
pub mod file_name;
pub mod model_resolver;
pub mod storage_layout;
