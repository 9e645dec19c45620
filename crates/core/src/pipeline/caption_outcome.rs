use std::path::PathBuf;

use crate::subtitle::domain::caption_style::CaptionStyle;
use crate::subtitle::domain::segment::Segment;
use crate::subtitle::domain::subtitle_document::SubtitleDocument;
use crate::transcription::domain::transcription_task::TranscriptionTask;

/// Result of the captions-only workflow.
#[derive(Clone, Debug)]
pub struct CaptionOutcome {
    /// Task the engine actually ran (after the captions-only upgrade).
    pub task: TranscriptionTask,
    pub style: CaptionStyle,
    pub language: String,
    pub document: SubtitleDocument,
    /// Serialized SRT with the style applied.
    pub captions: String,
}

impl CaptionOutcome {
    pub fn segments(&self) -> &[Segment] {
        self.document.segments()
    }

    pub fn message(&self) -> String {
        format!("Captions generated successfully using {} mode", self.task)
    }
}

/// Result of the captions-plus-video workflow.
#[derive(Clone, Debug)]
pub struct EmbedOutcome {
    pub task: TranscriptionTask,
    pub language: String,
    pub document: SubtitleDocument,
    /// Unstyled SRT, identical to the embedded track.
    pub captions: String,
    pub output_path: PathBuf,
    pub output_filename: String,
}

impl EmbedOutcome {
    pub fn segments(&self) -> &[Segment] {
        self.document.segments()
    }

    pub fn message(&self) -> &'static str {
        "Video with captions generated successfully"
    }

    pub fn download_url(&self) -> String {
        format!("/download/{}", self.output_filename)
    }
}
