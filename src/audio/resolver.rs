use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{
    audio::{
        fetch,
        probe,
        types::{AudioSource, AudioTrack, TrimWindow},
    },
    config::WorkspaceConfig,
    error::{AcquisitionError, LapseError, Result},
    media,
};

/// Resolves the configured audio source into a single canonical audio file
///
/// The three source shapes (absent, local file, remote video reference) all
/// funnel into the same output: either `None` or one [`AudioTrack`] living in
/// the audio working directory, overwriting whatever a prior run left there.
///
/// Trim windows degrade gracefully: a window that is malformed or falls
/// outside the source duration produces the full untrimmed audio plus a
/// warning, never a hard failure.
pub struct AudioResolver {
    audio_dir: PathBuf,
}

impl AudioResolver {
    pub fn new(workspace: &WorkspaceConfig) -> Self {
        Self { audio_dir: workspace.audio_path() }
    }

    pub async fn resolve(
        &self,
        source: Option<AudioSource>,
        window: Option<TrimWindow>,
    ) -> Result<Option<AudioTrack>> {
        let Some(source) = source else {
            info!("No audio source supplied; pacing from the default display rate");
            return Ok(None);
        };

        std::fs::create_dir_all(&self.audio_dir)?;

        let track = match source {
            AudioSource::Remote(url) => self.resolve_remote(&url, window).await?,
            AudioSource::Local(path) => self.resolve_local(&path, window).await?,
        };

        if track.duration <= 0.0 {
            return Err(LapseError::empty_input(format!(
                "resolved audio {:?} has zero duration",
                track.path
            )));
        }

        info!("Resolved audio track: {:?} ({:.2}s)", track.path, track.duration);
        Ok(Some(track))
    }

    /// Fetch the remote video, optionally trim it, then extract its audio
    async fn resolve_remote(&self, url: &str, window: Option<TrimWindow>) -> Result<AudioTrack> {
        let video = fetch::fetch_video(url, &self.audio_dir).await?;

        let video_duration =
            media::probe_media_duration(&video)
                .await
                .map_err(|reason| AcquisitionError::ProbeFailed {
                    path: video.clone(),
                    reason,
                })?;

        let extraction_source = match window {
            Some(w) if w.is_valid_for(video_duration) => {
                info!("Trimming fetched video to [{:.1}s, {:.1}s]", w.start, w.end);
                let trimmed = self.audio_dir.join("source_trimmed.mp4");
                media::run_ffmpeg(vec![
                    "-i".into(),
                    video.display().to_string(),
                    "-ss".into(),
                    w.start.to_string(),
                    "-to".into(),
                    w.end.to_string(),
                    "-c".into(),
                    "copy".into(),
                    "-y".into(),
                    trimmed.display().to_string(),
                ])
                .await
                .map_err(|reason| AcquisitionError::ExtractionFailed {
                    path: video.clone(),
                    reason,
                })?;
                trimmed
            }
            Some(w) => {
                warn!(
                    "Trim window [{:.1}s, {:.1}s] not usable for a {:.1}s video; using the full source",
                    w.start, w.end, video_duration
                );
                video.clone()
            }
            None => video.clone(),
        };

        let canonical = self.audio_dir.join("track.m4a");
        media::run_ffmpeg(vec![
            "-i".into(),
            extraction_source.display().to_string(),
            "-vn".into(),
            "-c:a".into(),
            "aac".into(),
            "-y".into(),
            canonical.display().to_string(),
        ])
        .await
        .map_err(|reason| AcquisitionError::ExtractionFailed {
            path: extraction_source,
            reason,
        })?;

        let duration = probe::probe_duration(&canonical)?;
        Ok(AudioTrack { path: canonical, duration })
    }

    /// Trim or copy a local audio file into the canonical artifact
    async fn resolve_local(&self, source: &Path, window: Option<TrimWindow>) -> Result<AudioTrack> {
        let source_duration = probe::probe_duration(source)?;

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("mp3");
        let canonical = self.audio_dir.join(format!("track.{}", extension));

        match window {
            Some(w) if w.is_valid_for(source_duration) => {
                info!("Trimming local audio to [{:.1}s, {:.1}s]", w.start, w.end);
                media::run_ffmpeg(vec![
                    "-i".into(),
                    source.display().to_string(),
                    "-ss".into(),
                    w.start.to_string(),
                    "-to".into(),
                    w.end.to_string(),
                    "-c".into(),
                    "copy".into(),
                    "-y".into(),
                    canonical.display().to_string(),
                ])
                .await
                .map_err(|reason| AcquisitionError::ExtractionFailed {
                    path: source.to_path_buf(),
                    reason,
                })?;
            }
            other => {
                if let Some(w) = other {
                    warn!(
                        "Trim window [{:.1}s, {:.1}s] not usable for a {:.1}s source; using the full audio",
                        w.start, w.end, source_duration
                    );
                }
                std::fs::copy(source, &canonical)?;
            }
        }

        let duration = probe::probe_duration(&canonical)?;
        Ok(AudioTrack { path: canonical, duration })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn workspace(root: &Path) -> WorkspaceConfig {
        WorkspaceConfig {
            root: root.to_path_buf(),
            ..WorkspaceConfig::default()
        }
    }

    fn write_wav(path: &Path, seconds: f64) {
        let sample_rate = 8000u32;
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..(seconds * sample_rate as f64) as usize {
            writer.write_sample(((i % 80) as i16) * 100).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[tokio::test]
    async fn test_absent_source_resolves_to_none_without_io() {
        let dir = tempdir().unwrap();
        let ws = workspace(&dir.path().join("work"));
        let resolver = AudioResolver::new(&ws);

        let track = resolver.resolve(None, None).await.unwrap();
        assert!(track.is_none());
        assert!(!ws.audio_path().exists(), "no working dir should be created");
    }

    #[tokio::test]
    async fn test_local_source_without_window_uses_full_audio() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("song.wav");
        write_wav(&source, 3.0);

        let ws = workspace(&dir.path().join("work"));
        let resolver = AudioResolver::new(&ws);

        let track = resolver
            .resolve(Some(AudioSource::Local(source)), None)
            .await
            .unwrap()
            .unwrap();

        assert!((track.duration - 3.0).abs() < 0.01);
        assert!(track.path.starts_with(ws.audio_path()));
        assert!(track.path.is_file());
    }

    #[tokio::test]
    async fn test_out_of_range_window_falls_back_to_full_audio() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("song.wav");
        write_wav(&source, 3.0);

        let ws = workspace(&dir.path().join("work"));
        let resolver = AudioResolver::new(&ws);

        // window past the end of a 3s file: full fallback, not an error
        let track = resolver
            .resolve(
                Some(AudioSource::Local(source)),
                Some(TrimWindow::new(40.0, 50.0)),
            )
            .await
            .unwrap()
            .unwrap();

        assert!((track.duration - 3.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_inverted_window_treated_as_out_of_range() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("song.wav");
        write_wav(&source, 3.0);

        let ws = workspace(&dir.path().join("work"));
        let resolver = AudioResolver::new(&ws);

        let track = resolver
            .resolve(
                Some(AudioSource::Local(source)),
                Some(TrimWindow::new(2.0, 1.0)),
            )
            .await
            .unwrap()
            .unwrap();

        assert!((track.duration - 3.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_missing_local_source_is_fatal() {
        let dir = tempdir().unwrap();
        let ws = workspace(&dir.path().join("work"));
        let resolver = AudioResolver::new(&ws);

        let result = resolver
            .resolve(Some(AudioSource::Local(PathBuf::from("gone.wav"))), None)
            .await;

        assert!(matches!(
            result,
            Err(LapseError::Acquisition(AcquisitionError::SourceMissing { .. }))
        ));
    }

    #[tokio::test]
    async fn test_valid_window_trims_local_audio() {
        if !media::ffmpeg_available() {
            eprintln!("skipping: ffmpeg not on PATH");
            return;
        }

        let dir = tempdir().unwrap();
        let source = dir.path().join("song.wav");
        write_wav(&source, 10.0);

        let ws = workspace(&dir.path().join("work"));
        let resolver = AudioResolver::new(&ws);

        let track = resolver
            .resolve(
                Some(AudioSource::Local(source)),
                Some(TrimWindow::new(2.0, 6.0)),
            )
            .await
            .unwrap()
            .unwrap();

        assert!((track.duration - 4.0).abs() < 0.2, "got {}", track.duration);
    }
}
