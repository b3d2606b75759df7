use std::path::PathBuf;

/// Where the audio for the timelapse comes from
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    /// A local audio file (wav, mp3, flac, ...)
    Local(PathBuf),

    /// A remote video reference; its audio track gets extracted after fetch
    Remote(String),
}

impl AudioSource {
    /// Classify a CLI argument: URL schemes mark a remote reference,
    /// everything else is a local path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Remote(raw.to_string())
        } else {
            Self::Local(PathBuf::from(raw))
        }
    }
}

/// Requested trim bounds, in seconds from the start of the source
///
/// A window is only honored when it lies fully inside the source duration
/// and `start < end`; anything else degrades to the full source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimWindow {
    pub start: f64,
    pub end: f64,
}

impl TrimWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whether this window can be applied to a source of `duration` seconds
    pub fn is_valid_for(&self, duration: f64) -> bool {
        self.start >= 0.0
            && self.end > self.start
            && self.end <= duration
            && self.start.is_finite()
            && self.end.is_finite()
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// A resolved, trimmed-or-full audio artifact with a known duration
#[derive(Debug, Clone)]
pub struct AudioTrack {
    /// Canonical file inside the audio working directory
    pub path: PathBuf,

    /// Duration in seconds, always > 0
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_classification() {
        assert_eq!(
            AudioSource::parse("https://example.com/v/123"),
            AudioSource::Remote("https://example.com/v/123".to_string())
        );
        assert_eq!(
            AudioSource::parse("http://example.com/clip"),
            AudioSource::Remote("http://example.com/clip".to_string())
        );
        assert_eq!(
            AudioSource::parse("music/track.mp3"),
            AudioSource::Local(PathBuf::from("music/track.mp3"))
        );
    }

    #[test]
    fn test_window_validity() {
        let d = 30.0;
        assert!(TrimWindow::new(0.0, 30.0).is_valid_for(d));
        assert!(TrimWindow::new(5.0, 10.0).is_valid_for(d));

        // out of range
        assert!(!TrimWindow::new(40.0, 50.0).is_valid_for(d));
        assert!(!TrimWindow::new(10.0, 31.0).is_valid_for(d));
        assert!(!TrimWindow::new(-1.0, 10.0).is_valid_for(d));

        // malformed windows behave exactly like out-of-range ones
        assert!(!TrimWindow::new(10.0, 10.0).is_valid_for(d));
        assert!(!TrimWindow::new(20.0, 5.0).is_valid_for(d));
        assert!(!TrimWindow::new(f64::NAN, 10.0).is_valid_for(d));
    }

    #[test]
    fn test_window_length() {
        assert_eq!(TrimWindow::new(18.0, 70.0).length(), 52.0);
    }
}
