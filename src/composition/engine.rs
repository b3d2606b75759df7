use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    audio::{AudioResolver, AudioSource, TrimWindow},
    composition::compositor::{Compositor, TimelapseArtifact},
    config::Config,
    error::{LapseError, Result},
    photo::Normalizer,
    sync,
};

/// One pipeline invocation's inputs
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Directory holding the source photos
    pub photo_dir: PathBuf,

    /// Optional audio source; `None` means the default display rate applies
    pub audio: Option<AudioSource>,

    /// Optional trim window for the audio source
    pub window: Option<TrimWindow>,

    /// Destination of the final artifact
    pub output: PathBuf,
}

/// Orchestrates the audio-synchronized timelapse pipeline
///
/// Stages run strictly in sequence, each one finishing all of its file I/O
/// before the next begins:
/// 1. Photo scan - list and order the source photos
/// 2. Audio resolution - fetch/trim the audio source into one artifact
/// 3. Synchronization - derive the per-photo display duration
/// 4. Normalization - resize and reorient every photo
/// 5. Composition - encode the frames and mux the audio
pub struct TimelapseEngine {
    config: Config,
}

impl TimelapseEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self, request: &RunRequest) -> Result<TimelapseArtifact> {
        info!("Starting timelapse pipeline");
        info!("   Photos: {:?}", request.photo_dir);
        info!("   Audio: {:?}", request.audio);
        info!("   Output: {:?}", request.output);

        self.config.validate()?;

        // Stage 1: photo scan. An empty set must surface before any working
        // directory is touched.
        let normalizer = Normalizer::new(self.config.photo.clone());
        let photos = normalizer.scan(&request.photo_dir)?;
        if photos.is_empty() {
            return Err(LapseError::empty_input(format!(
                "no photos found in {:?}",
                request.photo_dir
            )));
        }

        // Stage 2: audio resolution
        let resolver = AudioResolver::new(&self.config.workspace);
        let audio = resolver
            .resolve(request.audio.clone(), request.window)
            .await?;

        // Stage 3: synchronization
        let spec = sync::synchronize(audio.as_ref(), photos.len(), self.config.output.default_fps)?;
        info!(
            "Pacing: {:.4}s per photo ({:.4} fps) across {} photos",
            spec.seconds_per_photo,
            spec.fps,
            photos.len()
        );

        // Stage 4: normalization
        let frames_dir = self.config.workspace.frames_path();
        let frames = normalizer.normalize(&photos, &frames_dir)?;
        debug!("Normalized {} frames into {:?}", frames.len(), frames_dir);

        // Stage 5: composition
        let compositor = Compositor::new(self.config.output.clone(), frames_dir);
        let artifact = compositor
            .composite(&frames, &spec, audio.as_ref(), &request.output)
            .await?;

        info!("Timelapse written to {:?}", artifact.path);
        Ok(artifact)
    }
}
