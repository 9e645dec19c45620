use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use captioner_core::pipeline::caption_service::CaptionService;
use captioner_core::pipeline::pipeline_logger::{LogPipelineLogger, PipelineLogger};
use captioner_core::pipeline::staged_video::StagedVideo;
use captioner_core::shared::config::CaptionerConfig;
use captioner_core::subtitle::domain::caption_style::CaptionStyle;
use captioner_core::transcription::domain::transcription_task::TranscriptionTask;

/// Speech-to-text captions for video files.
#[derive(Parser)]
#[command(name = "captioner")]
struct Cli {
    /// JSON config file (upload/output dirs, ffmpeg path, model settings).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Whisper model file; skips the cache lookup and download.
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// ffmpeg binary to invoke.
    #[arg(long, global = true)]
    ffmpeg: Option<PathBuf>,

    /// Drop caption blocks whose text is empty.
    #[arg(long, global = true)]
    drop_empty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate SRT captions for a video.
    Captions {
        /// Input video file.
        video: PathBuf,

        /// transcribe or translate (captions are always produced in English).
        #[arg(long, default_value = "translate")]
        task: String,

        /// Caption style: formal, meme or aesthetic.
        #[arg(long, default_value = "formal")]
        style: String,

        /// Write the SRT to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the full result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Produce a copy of the video with an embedded English subtitle track.
    Embed {
        /// Input video file.
        video: PathBuf,

        /// transcribe (keep source language) or translate (English).
        #[arg(long, default_value = "translate")]
        task: String,

        /// Directory for `<name>_with_captions.mkv`.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = CaptionerConfig::load_or_default(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.model_path = Some(model);
    }
    if let Some(ffmpeg) = cli.ffmpeg {
        config.ffmpeg_path = ffmpeg;
    }
    if cli.drop_empty {
        config.drop_empty_segments = true;
    }

    match cli.command {
        Command::Captions {
            video,
            task,
            style,
            output,
            json,
        } => {
            let service = build_service(&config)?;
            run_captions(
                &service,
                &video,
                TranscriptionTask::parse_lenient(&task),
                CaptionStyle::parse_lenient(&style),
                output.as_deref(),
                json,
            )
        }
        Command::Embed {
            video,
            task,
            output_dir,
        } => {
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            let service = build_service(&config)?;
            run_embed(&service, &video, TranscriptionTask::parse_lenient(&task))
        }
    }
}

fn run_captions(
    service: &CaptionService,
    video: &Path,
    task: TranscriptionTask,
    style: CaptionStyle,
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let staged = StagedVideo::external(video)?;
    let mut logger = LogPipelineLogger::new(staged.original_name().to_string());
    let outcome = service.generate_captions(staged, task, style, &mut logger)?;
    logger.summary();

    if let Some(path) = output {
        fs::write(path, &outcome.captions)?;
        log::info!("Captions written to {}", path.display());
    }

    if json {
        let body = serde_json::json!({
            "success": true,
            "captions": outcome.captions,
            "segments": outcome.segments(),
            "language_detected": outcome.language,
            "message": outcome.message(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else if output.is_none() {
        print!("{}", outcome.captions);
    }
    Ok(())
}

fn run_embed(
    service: &CaptionService,
    video: &Path,
    task: TranscriptionTask,
) -> Result<(), Box<dyn std::error::Error>> {
    let staged = StagedVideo::external(video)?;
    let mut logger = LogPipelineLogger::new(staged.original_name().to_string());
    let outcome = service.embed_captions(staged, task, &mut logger)?;
    logger.summary();

    log::info!(
        "{} segments, language: {}",
        outcome.segments().len(),
        outcome.language
    );
    println!("{}", outcome.output_path.display());
    Ok(())
}

fn build_service(config: &CaptionerConfig) -> Result<CaptionService, Box<dyn std::error::Error>> {
    let service = CaptionService::from_config(config, None, Some(Box::new(download_progress)))?;
    service.layout().ensure_dirs()?;
    Ok(service)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading Whisper model... {pct}%");
    } else {
        eprint!("\rDownloading Whisper model... {downloaded} bytes");
    }
}
