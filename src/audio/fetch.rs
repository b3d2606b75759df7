use std::io::Write;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tracing::{debug, info};

use crate::error::{AcquisitionError, Result};

/// Filename for the fetched remote video inside the audio working directory
const FETCHED_VIDEO_NAME: &str = "source_video.mp4";

/// Stream a remote video reference to disk.
///
/// The whole resource is fetched before any trimming happens; there is no
/// retry on failure, a broken fetch aborts the run.
pub async fn fetch_video(url: &str, audio_dir: &Path) -> Result<PathBuf> {
    info!("Fetching remote video from {}", url);

    let fetch_err = |reason: String| AcquisitionError::FetchFailed {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_err(e.to_string()))?;

    if !response.status().is_success() {
        return Err(fetch_err(format!("HTTP {}", response.status())).into());
    }

    let total_size = response.content_length().unwrap_or(0);
    let target = audio_dir.join(FETCHED_VIDEO_NAME);

    let mut file = std::fs::File::create(&target)?;
    let mut downloaded: u64 = 0;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| fetch_err(e.to_string()))?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
    }

    if total_size > 0 && downloaded < total_size {
        return Err(fetch_err(format!(
            "truncated download: {} of {} bytes",
            downloaded, total_size
        ))
        .into());
    }

    debug!("Fetched {} bytes to {:?}", downloaded, target);
    Ok(target)
}
