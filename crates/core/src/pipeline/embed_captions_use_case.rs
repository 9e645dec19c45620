use std::fs;
use std::sync::Arc;
use std::time::Instant;

use crate::media::domain::subtitle_muxer::SubtitleMuxer;
use crate::pipeline::caption_outcome::EmbedOutcome;
use crate::pipeline::partial_output::PartialOutput;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::staged_video::StagedVideo;
use crate::pipeline::transcribe_stage::TranscribeStage;
use crate::shared::caption_error::CaptionError;
use crate::shared::constants::SUBTITLE_FILENAME;
use crate::shared::file_name::output_name_for;
use crate::shared::storage_layout::StorageLayout;
use crate::subtitle::domain::subtitle_document::EmptySegments;
use crate::transcription::domain::transcription_task::TranscriptionTask;

/// Captions-plus-video workflow: extract, transcribe, write the SRT, remux.
///
/// The task is used as given and no style is applied to the embedded
/// track. On success the remuxed file is left in the output area as
/// `<stem>_with_captions.mkv`; on any failure nothing is left there.
pub struct EmbedCaptionsUseCase {
    stage: TranscribeStage,
    muxer: Arc<dyn SubtitleMuxer>,
    layout: StorageLayout,
    empty_segments: EmptySegments,
}

impl EmbedCaptionsUseCase {
    pub fn new(
        stage: TranscribeStage,
        muxer: Arc<dyn SubtitleMuxer>,
        layout: StorageLayout,
        empty_segments: EmptySegments,
    ) -> Self {
        Self {
            stage,
            muxer,
            layout,
            empty_segments,
        }
    }

    pub fn run(
        &self,
        video: StagedVideo,
        task: TranscriptionTask,
        logger: &mut dyn PipelineLogger,
    ) -> Result<EmbedOutcome, CaptionError> {
        logger.info(&format!(
            "Generating captioned video for {} ({task})",
            video.original_name()
        ));

        let scratch = TranscribeStage::scratch_dir()?;
        let result = self.stage.run(video.path(), scratch.path(), task, logger)?;

        let t = Instant::now();
        let captions = result.document().to_srt_with(self.empty_segments);
        let srt_path = scratch.path().join(SUBTITLE_FILENAME);
        fs::write(&srt_path, &captions)
            .map_err(|e| CaptionError::io("failed to write subtitle file", &srt_path, e))?;
        logger.timing("serialize", t.elapsed().as_secs_f64() * 1000.0);
        logger.captions(&captions);

        let output_filename = output_name_for(video.original_name());
        fs::create_dir_all(self.layout.output_dir()).map_err(|e| {
            CaptionError::io("failed to create output directory", self.layout.output_dir(), e)
        })?;
        let output = PartialOutput::new(self.layout.output_path(&output_filename));

        let t = Instant::now();
        self.muxer.mux(video.path(), &srt_path, output.path())?;
        logger.timing("mux", t.elapsed().as_secs_f64() * 1000.0);

        let output_path = output.commit();
        logger.info(&format!("Wrote {}", output_path.display()));

        let language = result.language().to_string();
        Ok(EmbedOutcome {
            task,
            language,
            document: result.into_document(),
            captions,
            output_path,
            output_filename,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::pipeline::test_support::{serialized, StubExtractor, StubMuxer, StubRecognizer};
    use tempfile::TempDir;

    struct Fixture {
        uploads: TempDir,
        outputs: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                uploads: TempDir::new().unwrap(),
                outputs: TempDir::new().unwrap(),
            }
        }

        fn use_case(&self, fail_extract: bool, fail_mux: bool) -> (EmbedCaptionsUseCase, StubCalls) {
            let (recognizer, calls) = StubRecognizer::echo();
            let stage = TranscribeStage::new(
                Arc::new(StubExtractor { fail: fail_extract }),
                serialized(recognizer),
            );
            let layout = StorageLayout::new(self.uploads.path(), self.outputs.path());
            let use_case = EmbedCaptionsUseCase::new(
                stage,
                Arc::new(StubMuxer { fail_after_write: fail_mux }),
                layout,
                EmptySegments::Keep,
            );
            (use_case, calls)
        }

        fn stage(&self, name: &str, bytes: &[u8]) -> StagedVideo {
            StagedVideo::stage_bytes(self.uploads.path(), name, bytes).unwrap()
        }

        fn count(dir: &TempDir) -> usize {
            fs::read_dir(dir.path()).unwrap().count()
        }
    }

    type StubCalls = Arc<std::sync::Mutex<Vec<TranscriptionTask>>>;

    #[test]
    fn test_success_writes_named_output_and_removes_upload() {
        let fx = Fixture::new();
        let (use_case, _) = fx.use_case(false, false);
        let video = fx.stage("holiday.mov", b"Hi there.");

        let outcome = use_case
            .run(video, TranscriptionTask::Translate, &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(outcome.output_filename, "holiday_with_captions.mkv");
        assert_eq!(outcome.download_url(), "/download/holiday_with_captions.mkv");
        assert_eq!(outcome.output_path, fx.outputs.path().join("holiday_with_captions.mkv"));
        assert_eq!(outcome.message(), "Video with captions generated successfully");

        let container = fs::read_to_string(&outcome.output_path).unwrap();
        assert_eq!(
            container,
            "Hi there.1\n00:00:00,000 --> 00:00:01,500\nHi there.\n\n"
        );
        assert_eq!(Fixture::count(&fx.uploads), 0);
    }

    #[test]
    fn test_embedded_track_is_never_styled() {
        let fx = Fixture::new();
        let (use_case, _) = fx.use_case(false, false);

        let outcome = use_case
            .run(fx.stage("clip.mp4", b"Dot. Dot."), TranscriptionTask::Translate, &mut NullPipelineLogger)
            .unwrap();

        assert!(outcome.captions.contains("Dot. Dot."));
    }

    #[test]
    fn test_task_is_used_as_given() {
        let fx = Fixture::new();
        let (use_case, calls) = fx.use_case(false, false);

        use_case
            .run(fx.stage("clip.mp4", b"x"), TranscriptionTask::Transcribe, &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), vec![TranscriptionTask::Transcribe]);
    }

    #[test]
    fn test_mux_failure_after_partial_write_leaves_no_output() {
        let fx = Fixture::new();
        let (use_case, _) = fx.use_case(false, true);

        let err = use_case
            .run(fx.stage("clip.mp4", b"x"), TranscriptionTask::Translate, &mut NullPipelineLogger)
            .unwrap_err();

        assert_eq!(err.to_string(), "ffmpeg error: Could not write header");
        assert!(!fx.outputs.path().join("clip_with_captions.mkv").exists());
        assert_eq!(Fixture::count(&fx.outputs), 0);
        assert_eq!(Fixture::count(&fx.uploads), 0);
    }

    #[test]
    fn test_extraction_failure_never_touches_output_area() {
        let fx = Fixture::new();
        let (use_case, calls) = fx.use_case(true, false);

        let err = use_case
            .run(fx.stage("clip.mp4", b"x"), TranscriptionTask::Translate, &mut NullPipelineLogger)
            .unwrap_err();

        assert!(matches!(err, CaptionError::ExternalTool { .. }));
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(Fixture::count(&fx.outputs), 0);
        assert_eq!(Fixture::count(&fx.uploads), 0);
    }
}
