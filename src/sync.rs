//! # Frame Rate Synchronizer
//!
//! Computes the uniform per-photo display duration so that the photo
//! sequence exactly spans the audio track. Pure arithmetic, no side effects.

use crate::{
    audio::AudioTrack,
    error::{ConfigError, LapseError, Result},
};

/// Computed synchronization parameters for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelapseSpec {
    /// Screen time of each photo, in seconds
    pub seconds_per_photo: f64,

    /// Output frame rate, the reciprocal of `seconds_per_photo`
    pub fps: f64,
}

impl TimelapseSpec {
    fn from_seconds_per_photo(seconds_per_photo: f64) -> Self {
        Self {
            seconds_per_photo,
            fps: 1.0 / seconds_per_photo,
        }
    }

    /// Total video duration for `photo_count` photos
    pub fn total_duration(&self, photo_count: usize) -> f64 {
        self.seconds_per_photo * photo_count as f64
    }
}

/// Derive the per-photo display duration.
///
/// With audio, the photos divide the audio duration evenly; without audio,
/// the caller-supplied default display rate applies. Zero photos is a fatal
/// precondition violation, not a recoverable state.
pub fn synchronize(
    audio: Option<&AudioTrack>,
    photo_count: usize,
    default_fps: f64,
) -> Result<TimelapseSpec> {
    if photo_count == 0 {
        return Err(LapseError::empty_input("photo set is empty"));
    }

    let spec = match audio {
        Some(track) => {
            if track.duration <= 0.0 {
                return Err(LapseError::empty_input("audio track has zero duration"));
            }
            TimelapseSpec::from_seconds_per_photo(track.duration / photo_count as f64)
        }
        None => {
            if default_fps <= 0.0 || !default_fps.is_finite() {
                return Err(ConfigError::InvalidValue {
                    key: "output.default_fps".to_string(),
                    value: default_fps.to_string(),
                }
                .into());
            }
            TimelapseSpec::from_seconds_per_photo(1.0 / default_fps)
        }
    };

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track(duration: f64) -> AudioTrack {
        AudioTrack { path: PathBuf::from("track.m4a"), duration }
    }

    #[test]
    fn test_audio_paced_spec() {
        // 10 photos over 20s of audio: 2s each at 0.5 fps
        let spec = synchronize(Some(&track(20.0)), 10, 1.0).unwrap();
        assert_eq!(spec.seconds_per_photo, 2.0);
        assert_eq!(spec.fps, 0.5);
        assert_eq!(spec.total_duration(10), 20.0);
    }

    #[test]
    fn test_default_rate_without_audio() {
        let spec = synchronize(None, 5, 1.0).unwrap();
        assert_eq!(spec.seconds_per_photo, 1.0);
        assert_eq!(spec.fps, 1.0);
        assert_eq!(spec.total_duration(5), 5.0);

        let spec = synchronize(None, 5, 4.0).unwrap();
        assert_eq!(spec.seconds_per_photo, 0.25);
    }

    #[test]
    fn test_sequence_spans_audio_exactly() {
        let spec = synchronize(Some(&track(33.7)), 7, 1.0).unwrap();
        assert!((spec.total_duration(7) - 33.7).abs() < 1e-9);
    }

    #[test]
    fn test_zero_photos_is_fatal() {
        let result = synchronize(Some(&track(20.0)), 0, 1.0);
        assert!(matches!(result, Err(LapseError::EmptyInput { .. })));
    }

    #[test]
    fn test_zero_duration_audio_is_fatal() {
        let result = synchronize(Some(&track(0.0)), 10, 1.0);
        assert!(matches!(result, Err(LapseError::EmptyInput { .. })));
    }

    #[test]
    fn test_invalid_default_fps_rejected() {
        assert!(synchronize(None, 3, 0.0).is_err());
        assert!(synchronize(None, 3, -1.0).is_err());
        assert!(synchronize(None, 3, f64::INFINITY).is_err());
    }
}
