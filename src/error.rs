use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the soundlapse pipeline
#[derive(Error, Debug)]
pub enum LapseError {
    #[error("Audio acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("Photo processing error: {0}")]
    Photo(#[from] PhotoError),

    #[error("Composition error: {0}")]
    Composition(#[from] CompositionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Empty input: {details}")]
    EmptyInput { details: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while acquiring or trimming the audio source
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("Failed to fetch remote media from {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Audio source not found: {path}")]
    SourceMissing { path: PathBuf },

    #[error("Could not read audio duration from {path}: {reason}")]
    ProbeFailed { path: PathBuf, reason: String },

    #[error("Audio extraction failed for {path}: {reason}")]
    ExtractionFailed { path: PathBuf, reason: String },
}

/// Errors raised while scanning or normalizing photos
#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Photo directory not found: {path}")]
    DirectoryMissing { path: PathBuf },

    #[error("Could not decode photo {path}: {reason}")]
    DecodeFailed { path: PathBuf, reason: String },

    #[error("Could not write normalized photo {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// Errors raised during final artifact assembly
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("Normalized frame missing at composition time: {path}")]
    MissingFrame { path: PathBuf },

    #[error("Video encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("Audio muxing failed: {reason}")]
    MuxingFailed { reason: String },

    #[error("ffmpeg not found on PATH. Please install FFmpeg.")]
    FfmpegUnavailable,
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using LapseError
pub type Result<T> = std::result::Result<T, LapseError>;

impl LapseError {
    /// Empty-input precondition violation (zero photos, zero-length audio)
    pub fn empty_input<S: Into<String>>(details: S) -> Self {
        Self::EmptyInput { details: details.into() }
    }

    /// Get a user-friendly error message naming the failed stage
    pub fn user_message(&self) -> String {
        match self {
            Self::Acquisition(e) => format!("Audio source stage failed: {}", e),
            Self::Photo(e) => format!("Photo normalization stage failed: {}", e),
            Self::Composition(e) => format!("Composition stage failed: {}", e),
            Self::Config(e) => format!("Configuration invalid: {}", e),
            Self::EmptyInput { details } => format!("Nothing to do: {}", details),
            Self::Io(e) => format!("IO failure: {}", e),
        }
    }
}
