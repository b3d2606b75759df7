use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};

use soundlapse::{
    audio::{AudioSource, TrimWindow},
    composition::{RunRequest, TimelapseEngine},
    config::Config,
};

#[derive(Parser)]
#[command(
    name = "soundlapse",
    version,
    about = "Assemble photo sequences into timelapse videos paced by an audio track",
    long_about = "Soundlapse turns a directory of photos into a timelapse video. With an audio \
source (a local file or a video URL whose audio gets extracted), the photos are paced so the \
sequence exactly spans the audio; without one, a fixed display rate applies."
)]
struct Cli {
    /// Directory containing the source photos (jpg, jpeg, png)
    #[arg(short, long)]
    photos: PathBuf,

    /// Audio source: a local audio file or an http(s) video URL
    #[arg(short, long)]
    audio: Option<String>,

    /// Trim window start in seconds (requires --end)
    #[arg(long)]
    start: Option<f64>,

    /// Trim window end in seconds (requires --start)
    #[arg(long)]
    end: Option<f64>,

    /// Photos per second when no audio source is given (overrides the config value)
    #[arg(short, long)]
    fps: Option<f64>,

    /// Output video file path
    #[arg(short, long)]
    output: PathBuf,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// An explicit --fps wins over the config file; an absent flag leaves the
/// configured default_fps untouched.
fn apply_fps_override(config: &mut Config, fps: Option<f64>) {
    if let Some(fps) = fps {
        config.output.default_fps = fps;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting soundlapse v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => Config::default(),
    };
    apply_fps_override(&mut config, cli.fps);

    let window = match (cli.start, cli.end) {
        (Some(start), Some(end)) => Some(TrimWindow::new(start, end)),
        (None, None) => None,
        _ => {
            warn!("Both --start and --end are required for trimming; ignoring the partial window");
            None
        }
    };

    let request = RunRequest {
        photo_dir: cli.photos,
        audio: cli.audio.as_deref().map(AudioSource::parse),
        window,
        output: cli.output,
    };

    let engine = TimelapseEngine::new(config);
    match engine.run(&request).await {
        Ok(artifact) => {
            info!(
                "Done: {:?} ({:.1}s, {} frames)",
                artifact.path, artifact.duration, artifact.frame_count
            );
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(e.user_message())),
    }
}
