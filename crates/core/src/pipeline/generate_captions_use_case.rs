use std::time::Instant;

use crate::pipeline::caption_outcome::CaptionOutcome;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::staged_video::StagedVideo;
use crate::pipeline::transcribe_stage::TranscribeStage;
use crate::shared::caption_error::CaptionError;
use crate::subtitle::domain::caption_style::CaptionStyle;
use crate::subtitle::domain::subtitle_document::EmptySegments;
use crate::transcription::domain::transcription_task::TranscriptionTask;

/// Captions-only workflow: extract, transcribe, serialize, style.
///
/// The staged video is consumed and therefore removed when `run` returns,
/// and the scratch directory holding the audio is removed with it. This
/// workflow never writes to the output area.
pub struct GenerateCaptionsUseCase {
    stage: TranscribeStage,
    empty_segments: EmptySegments,
}

impl GenerateCaptionsUseCase {
    pub fn new(stage: TranscribeStage, empty_segments: EmptySegments) -> Self {
        Self {
            stage,
            empty_segments,
        }
    }

    pub fn run(
        &self,
        video: StagedVideo,
        requested_task: TranscriptionTask,
        style: CaptionStyle,
        logger: &mut dyn PipelineLogger,
    ) -> Result<CaptionOutcome, CaptionError> {
        let task = requested_task.for_captions_only();
        if task != requested_task {
            log::debug!("Captions-only request asked for {requested_task}; running {task}");
        }
        logger.info(&format!(
            "Generating captions for {} ({task}, {style} style)",
            video.original_name()
        ));

        let scratch = TranscribeStage::scratch_dir()?;
        let result = self.stage.run(video.path(), scratch.path(), task, logger)?;

        let t = Instant::now();
        let srt = result.document().to_srt_with(self.empty_segments);
        logger.timing("serialize", t.elapsed().as_secs_f64() * 1000.0);

        let t = Instant::now();
        let captions = style.apply(&srt);
        logger.timing("style", t.elapsed().as_secs_f64() * 1000.0);
        logger.captions(&captions);

        let language = result.language().to_string();
        Ok(CaptionOutcome {
            task,
            style,
            language,
            document: result.into_document(),
            captions,
        })
    }
}
