use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for the soundlapse pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Photo normalization settings
    pub photo: PhotoConfig,

    /// Output encoding settings
    pub output: OutputConfig,

    /// Working directory layout
    pub workspace: WorkspaceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            photo: PhotoConfig::default(),
            output: OutputConfig::default(),
            workspace: WorkspaceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string(),
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.photo.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// How photos are resized during normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResizeMode {
    /// Fixed width, height scaled to preserve the aspect ratio
    KeepAspect,

    /// Fixed width and height, aspect ratio not preserved
    Exact { height: u32 },
}

/// Photo normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoConfig {
    /// Target pixel width for every normalized photo
    pub target_width: u32,

    /// Resize policy
    pub resize: ResizeMode,

    /// Number of parallel normalization threads
    pub processing_threads: usize,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            target_width: 500,
            resize: ResizeMode::KeepAspect,
            processing_threads: num_cpus::get(),
        }
    }
}

impl PhotoConfig {
    fn validate(&self) -> Result<()> {
        if self.target_width == 0 {
            return Err(ConfigError::InvalidValue {
                key: "photo.target_width".to_string(),
                value: self.target_width.to_string(),
            }
            .into());
        }

        if let ResizeMode::Exact { height } = self.resize {
            if height == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "photo.resize.height".to_string(),
                    value: height.to_string(),
                }
                .into());
            }
        }

        if self.processing_threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "photo.processing_threads".to_string(),
                value: self.processing_threads.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Output encoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Video codec passed to the encoder
    pub codec: String,

    /// Quality setting (0-100, higher is better)
    pub quality: u8,

    /// Display rate used when no audio source is supplied (photos per second)
    pub default_fps: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            codec: "libx264".to_string(),
            quality: 85,
            default_fps: 1.0,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        if self.codec.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output.codec".to_string(),
                value: self.codec.clone(),
            }
            .into());
        }

        if self.quality > 100 {
            return Err(ConfigError::InvalidValue {
                key: "output.quality".to_string(),
                value: self.quality.to_string(),
            }
            .into());
        }

        if self.default_fps <= 0.0 || !self.default_fps.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "output.default_fps".to_string(),
                value: self.default_fps.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Working directory layout
///
/// Each pipeline stage writes into its own subdirectory, so two stages never
/// share a path. Two concurrent runs must not share the same root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Root scratch directory for a run
    pub root: PathBuf,

    /// Subdirectory for fetched/trimmed audio artifacts
    pub audio_dir: String,

    /// Subdirectory for normalized frames
    pub frames_dir: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("soundlapse_work"),
            audio_dir: "audio".to_string(),
            frames_dir: "frames".to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// Path of the audio stage's working directory
    pub fn audio_path(&self) -> PathBuf {
        self.root.join(&self.audio_dir)
    }

    /// Path of the normalizer stage's working directory
    pub fn frames_path(&self) -> PathBuf {
        self.root.join(&self.frames_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let original_config = Config::default();

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config.photo.target_width, loaded_config.photo.target_width);
        assert_eq!(original_config.output.codec, loaded_config.output.codec);
        assert_eq!(original_config.workspace.frames_dir, loaded_config.workspace.frames_dir);
    }

    #[test]
    fn test_invalid_target_width() {
        let mut config = Config::default();
        config.photo.target_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_default_fps() {
        let mut config = Config::default();
        config.output.default_fps = 0.0;
        assert!(config.validate().is_err());

        config.output.default_fps = -2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_exact_resize_height() {
        let mut config = Config::default();
        config.photo.resize = ResizeMode::Exact { height: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_workspace_paths_are_disjoint() {
        let ws = WorkspaceConfig::default();
        assert_ne!(ws.audio_path(), ws.frames_path());
    }
}
