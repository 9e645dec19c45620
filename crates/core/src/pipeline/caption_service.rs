use std::path::Path;
use std::sync::Arc;

use crate::media::domain::audio_extractor::AudioExtractor;
use crate::media::domain::subtitle_muxer::SubtitleMuxer;
use crate::media::infrastructure::ffmpeg_audio_extractor::FfmpegAudioExtractor;
use crate::media::infrastructure::ffmpeg_command::FfmpegCommand;
use crate::media::infrastructure::ffmpeg_subtitle_muxer::FfmpegSubtitleMuxer;
use crate::pipeline::caption_outcome::{CaptionOutcome, EmbedOutcome};
use crate::pipeline::embed_captions_use_case::EmbedCaptionsUseCase;
use crate::pipeline::generate_captions_use_case::GenerateCaptionsUseCase;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::staged_video::StagedVideo;
use crate::pipeline::transcribe_stage::TranscribeStage;
use crate::shared::caption_error::CaptionError;
use crate::shared::config::CaptionerConfig;
use crate::shared::model_resolver::{self, ModelLookup, ProgressFn};
use crate::shared::storage_layout::StorageLayout;
use crate::subtitle::domain::caption_style::CaptionStyle;
use crate::subtitle::domain::subtitle_document::EmptySegments;
use crate::transcription::domain::transcription_task::TranscriptionTask;
use crate::transcription::infrastructure::serialized_recognizer::SerializedRecognizer;
use crate::transcription::infrastructure::whisper_recognizer::WhisperRecognizer;

/// Both workflows wired to one shared engine and one storage layout.
///
/// Built once per process and shared by every request.
pub struct CaptionService {
    captions: GenerateCaptionsUseCase,
    embed: EmbedCaptionsUseCase,
    layout: StorageLayout,
}

impl CaptionService {
    pub fn new(
        extractor: Arc<dyn AudioExtractor>,
        recognizer: Arc<SerializedRecognizer>,
        muxer: Arc<dyn SubtitleMuxer>,
        layout: StorageLayout,
        empty_segments: EmptySegments,
    ) -> Self {
        let stage = TranscribeStage::new(extractor, recognizer);
        Self {
            captions: GenerateCaptionsUseCase::new(stage.clone(), empty_segments),
            embed: EmbedCaptionsUseCase::new(stage, muxer, layout.clone(), empty_segments),
            layout,
        }
    }

    /// Resolve the Whisper model, load it once and wire the ffmpeg adapters.
    pub fn from_config(
        config: &CaptionerConfig,
        bundled_dir: Option<&Path>,
        progress: Option<ProgressFn>,
    ) -> Result<Self, CaptionError> {
        let lookup = ModelLookup {
            name: &config.model_name,
            base_url: &config.model_base_url,
            explicit: config.model_path.as_deref(),
            bundled_dir,
        };
        log::info!("Resolving Whisper model: {}", config.model_name);
        let model_path = model_resolver::resolve(&lookup, progress)?;
        let engine = WhisperRecognizer::new(&model_path, config.threads)?;

        let ffmpeg = FfmpegCommand::new(&config.ffmpeg_path);
        let empty_segments = if config.drop_empty_segments {
            EmptySegments::Drop
        } else {
            EmptySegments::Keep
        };

        Ok(Self::new(
            Arc::new(FfmpegAudioExtractor::new(ffmpeg.clone())),
            Arc::new(SerializedRecognizer::new(Box::new(engine))),
            Arc::new(FfmpegSubtitleMuxer::new(ffmpeg)),
            StorageLayout::from_config(config),
            empty_segments,
        ))
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    pub fn generate_captions(
        &self,
        video: StagedVideo,
        task: TranscriptionTask,
        style: CaptionStyle,
        logger: &mut dyn PipelineLogger,
    ) -> Result<CaptionOutcome, CaptionError> {
        self.captions.run(video, task, style, logger)
    }

    pub fn embed_captions(
        &self,
        video: StagedVideo,
        task: TranscriptionTask,
        logger: &mut dyn PipelineLogger,
    ) -> Result<EmbedOutcome, CaptionError> {
        self.embed.run(video, task, logger)
    }
}
