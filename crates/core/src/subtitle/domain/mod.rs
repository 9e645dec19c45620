pub mod caption_style;
pub mod segment;
pub mod subtitle_document;
pub mod timestamp;
