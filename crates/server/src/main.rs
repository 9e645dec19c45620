use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use captioner_core::pipeline::caption_service::CaptionService;
use captioner_core::shared::config::CaptionerConfig;
use captioner_server::router::DEFAULT_MAX_UPLOAD_BYTES;
use captioner_server::{create_router, AppState};

/// HTTP API for caption generation.
#[derive(Parser)]
#[command(name = "captioner-server")]
struct Args {
    /// Address to bind.
    #[arg(long, env = "CAPTIONER_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "CAPTIONER_PORT", default_value_t = 5000)]
    port: u16,

    /// JSON config file (upload/output dirs, ffmpeg path, model settings).
    #[arg(long, env = "CAPTIONER_CONFIG")]
    config: Option<PathBuf>,

    /// Whisper model file; skips the cache lookup and download.
    #[arg(long, env = "CAPTIONER_MODEL")]
    model: Option<PathBuf>,

    /// Largest accepted request body in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let mut config = CaptionerConfig::load_or_default(args.config.as_deref())?;
    if let Some(model) = args.model {
        config.model_path = Some(model);
    }

    // Model download and load are blocking and happen once, before serving
    let service = tokio::task::spawn_blocking(move || {
        let service = CaptionService::from_config(&config, None, None)?;
        service.layout().ensure_dirs()?;
        Ok::<_, captioner_core::shared::caption_error::CaptionError>(service)
    })
    .await??;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let app = create_router(AppState::new(service), args.max_upload_bytes);

    log::info!("Caption server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
