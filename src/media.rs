//! External ffmpeg/ffprobe process helpers
//!
//! All codec work (video trim, audio extraction, frame encoding, muxing) is
//! delegated to ffmpeg subprocesses. Callers map the returned reason strings
//! into their own error kinds.

use std::path::Path;
use std::process::{Command, Stdio};

use tokio::task;
use tracing::debug;

/// Check that ffmpeg is on PATH
pub fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Run ffmpeg with the given arguments, surfacing stderr on failure
pub async fn run_ffmpeg(args: Vec<String>) -> std::result::Result<(), String> {
    debug!("Running ffmpeg {}", args.join(" "));

    let mut cmd = Command::new("ffmpeg");
    cmd.args(&args);

    let output = task::spawn_blocking(move || cmd.output())
        .await
        .map_err(|e| format!("Failed to spawn ffmpeg process: {}", e))?
        .map_err(|e| format!("ffmpeg execution failed: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("ffmpeg failed: {}", stderr));
    }

    Ok(())
}

/// Query a media file's container duration in seconds via ffprobe
pub async fn probe_media_duration<P: AsRef<Path>>(path: P) -> std::result::Result<f64, String> {
    let path = path.as_ref().to_path_buf();

    let output = task::spawn_blocking(move || {
        Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(&path)
            .output()
    })
    .await
    .map_err(|e| format!("Failed to spawn ffprobe process: {}", e))?
    .map_err(|e| format!("ffprobe execution failed: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("ffprobe failed: {}", stderr));
    }

    String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("ffprobe returned an unparseable duration: {}", e))
}
