//! Configuration file handling for ttv.
//!
//! Loads configuration from `~/.config/ttv/config.toml` or a custom path.
//! Every field is optional; CLI flags override the file, which overrides the
//! built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Configuration file structure for ttv.
/// Loaded from ~/.config/ttv/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct PlaybackConfig {
    /// Target frame rate (1-240).
    pub fps: Option<u32>,
    /// Render mode name: full-block, half-block, truecolor, diff.
    pub mode: Option<String>,
    /// Whether to drop frames to stay on schedule.
    pub skip: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RenderConfig {
    /// Ink threshold (0-255) for the monochrome modes.
    pub threshold: Option<u8>,
    /// Horizontal glyph repeat for full-block mode (1-4).
    pub repeat: Option<u32>,
    /// Show the playback stats line.
    pub stats: Option<bool>,
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// With an explicit path the file must exist and parse. With none, the
    /// default location is tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some();
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            if explicit {
                return Err(ConfigError::Io {
                    path,
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                });
            }
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse { path, source: e })
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("com", "ttv", "ttv")
        .map(|d| d.config_dir().to_path_buf().join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/ttv/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[playback]
fps = 24
mode = "diff"
skip = false

[render]
threshold = 90
repeat = 2
stats = true
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.playback.fps, Some(24));
        assert_eq!(config.playback.mode.as_deref(), Some("diff"));
        assert_eq!(config.playback.skip, Some(false));
        assert_eq!(config.render.threshold, Some(90));
        assert_eq!(config.render.repeat, Some(2));
        assert_eq!(config.render.stats, Some(true));
    }

    #[test]
    fn test_load_partial_file_leaves_rest_unset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[playback]\nfps = 60").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.playback.fps, Some(60));
        assert!(config.playback.mode.is_none());
        assert!(config.render.threshold.is_none());
    }

    #[test]
    fn test_malformed_file_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[playback\nfps = ").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        match &err {
            ConfigError::Parse { path, .. } => {
                assert_eq!(path, file.path());
            }
            other => panic!("expected Parse error, got {other}"),
        }
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }
}
