use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    audio::AudioTrack,
    config::OutputConfig,
    error::{CompositionError, Result},
    media,
    photo::NormalizedPhotoSet,
    sync::TimelapseSpec,
};

/// The final exported video artifact
#[derive(Debug, Clone)]
pub struct TimelapseArtifact {
    pub path: PathBuf,
    pub duration: f64,
    pub frame_count: usize,
    pub file_size: u64,
}

/// Sequences normalized frames into the final video via external ffmpeg
///
/// Each frame occupies exactly `seconds_per_photo` of screen time with hard
/// cuts between frames. When an audio track is present it is muxed in
/// unchanged, so the artifact duration equals the audio duration within
/// encoder rounding.
pub struct Compositor {
    config: OutputConfig,
    frames_dir: PathBuf,
}

impl Compositor {
    pub fn new(config: OutputConfig, frames_dir: PathBuf) -> Self {
        Self { config, frames_dir }
    }

    pub async fn composite(
        &self,
        frames: &NormalizedPhotoSet,
        spec: &TimelapseSpec,
        audio: Option<&AudioTrack>,
        output_path: &Path,
    ) -> Result<TimelapseArtifact> {
        info!(
            "Compositing {} frames at {:.4} fps into {:?}",
            frames.len(),
            spec.fps,
            output_path
        );

        // Every referenced frame must exist before any encoding starts
        for frame in frames.frames() {
            if !frame.is_file() {
                return Err(CompositionError::MissingFrame { path: frame.clone() }.into());
            }
        }

        if !media::ffmpeg_available() {
            return Err(CompositionError::FfmpegUnavailable.into());
        }

        let frame_list = self.write_frame_list(frames, spec.seconds_per_photo)?;

        let result = match audio {
            Some(track) => {
                let video_only = self.frames_dir.join("video_only.mp4");
                self.encode_video(&frame_list, spec.fps, &video_only).await?;
                self.mux_audio(&video_only, &track.path, output_path).await
            }
            None => self.encode_video(&frame_list, spec.fps, output_path).await,
        };

        if let Err(e) = result {
            // Never leave a half-written artifact at the output path
            let _ = std::fs::remove_file(output_path);
            return Err(e);
        }

        let file_size = std::fs::metadata(output_path)?.len();
        let artifact = TimelapseArtifact {
            path: output_path.to_path_buf(),
            duration: spec.total_duration(frames.len()),
            frame_count: frames.len(),
            file_size,
        };

        info!(
            "Composition complete: {:.1}s, {} frames, {:.1} MB",
            artifact.duration,
            artifact.frame_count,
            artifact.file_size as f64 / 1024.0 / 1024.0
        );

        Ok(artifact)
    }

    /// Write the concat demuxer list: one entry per frame with its display
    /// duration, last frame repeated so the demuxer honors the final duration.
    fn write_frame_list(
        &self,
        frames: &NormalizedPhotoSet,
        seconds_per_photo: f64,
    ) -> Result<PathBuf> {
        let list_path = self.frames_dir.join("frame_list.txt");
        let mut file = File::create(&list_path)?;

        for frame in frames.frames() {
            let absolute = frame
                .canonicalize()
                .unwrap_or_else(|_| frame.clone());
            writeln!(file, "file '{}'", absolute.display())?;
            writeln!(file, "duration {:.6}", seconds_per_photo)?;
        }

        if let Some(last) = frames.frames().last() {
            let absolute = last.canonicalize().unwrap_or_else(|_| last.clone());
            writeln!(file, "file '{}'", absolute.display())?;
        }

        debug!("Wrote frame list with {} entries to {:?}", frames.len(), list_path);
        Ok(list_path)
    }

    async fn encode_video(&self, frame_list: &Path, fps: f64, output: &Path) -> Result<()> {
        media::run_ffmpeg(vec![
            "-f".into(),
            "concat".into(),
            "-safe".into(),
            "0".into(),
            "-i".into(),
            frame_list.display().to_string(),
            "-c:v".into(),
            self.config.codec.clone(),
            "-r".into(),
            fps.to_string(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-crf".into(),
            quality_to_crf(self.config.quality).to_string(),
            "-y".into(),
            output.display().to_string(),
        ])
        .await
        .map_err(|reason| CompositionError::EncodingFailed { reason }.into())
    }

    async fn mux_audio(&self, video: &Path, audio: &Path, output: &Path) -> Result<()> {
        media::run_ffmpeg(vec![
            "-i".into(),
            video.display().to_string(),
            "-i".into(),
            audio.display().to_string(),
            "-c:v".into(),
            "copy".into(),
            "-c:a".into(),
            "aac".into(),
            "-shortest".into(),
            "-y".into(),
            output.display().to_string(),
        ])
        .await
        .map_err(|reason| CompositionError::MuxingFailed { reason }.into())
    }
}

/// Map a 0-100 quality setting onto the encoder's 51-0 CRF scale
fn quality_to_crf(quality: u8) -> u8 {
    (51 - ((quality.min(100) as f32 / 100.0) * 51.0) as u8).clamp(0, 51)
}
