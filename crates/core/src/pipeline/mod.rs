pub mod caption_outcome;
pub mod caption_service;
pub mod embed_captions_use_case;
pub mod generate_captions_use_case;
pub mod partial_output;
pub mod pipeline_logger;
pub mod staged_video;
pub mod transcribe_stage;

#[cfg(test)]
mod test_support;
