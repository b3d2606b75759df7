//! # soundlapse
//!
//! Assemble a still-photo sequence into a timelapse video whose playback
//! rate is paced by an accompanying audio track. The audio is either a local
//! file or the audio track of a remotely fetched video, optionally trimmed
//! to a time window.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use soundlapse::{
//!     audio::AudioSource,
//!     composition::{RunRequest, TimelapseEngine},
//!     config::Config,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let engine = TimelapseEngine::new(Config::default());
//! let artifact = engine
//!     .run(&RunRequest {
//!         photo_dir: "photos/".into(),
//!         audio: Some(AudioSource::parse("song.mp3")),
//!         window: None,
//!         output: "timelapse.mp4".into(),
//!     })
//!     .await?;
//! println!("{:.1}s written to {:?}", artifact.duration, artifact.path);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`photo`] - Photo scanning and normalization (order, size, orientation)
//! - [`audio`] - Audio source resolution (fetch, trim, duration probing)
//! - [`sync`] - Per-photo display duration arithmetic
//! - [`composition`] - Pipeline orchestration and final assembly
//! - [`config`] - Configuration management
//!
//! The photo count and the audio duration together fix the frame rate:
//! `seconds_per_photo = audio_duration / photo_count`, so the photo sequence
//! exactly spans the audio.

pub mod audio;
pub mod composition;
pub mod config;
pub mod error;
pub mod media;
pub mod photo;
pub mod sync;

// Re-export commonly used types for convenience
pub use crate::{
    composition::{RunRequest, TimelapseArtifact, TimelapseEngine},
    config::Config,
    error::{LapseError, Result},
};
