use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Fixed output width; the terminal is queried when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u16>,

    #[serde(default)]
    pub color: Mode,

    /// Inline images in terminals that support them
    #[serde(default)]
    pub images: Mode,

    /// Image size hint as "WIDTH,HEIGHT", e.g. "40,auto" or "50%,"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `MDHELP_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Three-way switch for features that are auto-detected by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Auto,
    Always,
    Never,
}

impl Mode {
    /// Settle the switch against what the terminal reported.
    pub fn resolve(self, detected: bool) -> bool {
        match self {
            Mode::Auto => detected,
            Mode::Always => true,
            Mode::Never => false,
        }
    }
}

impl Config {
    /// Get the XDG-style config file path (~/.config/mdhelp/config.toml)
    #[cfg(target_os = "macos")]
    fn xdg_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("mdhelp").join("config.toml"))
    }

    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/mdhelp/config.toml
    /// - Linux: ~/.config/mdhelp/config.toml
    /// - Windows: %APPDATA%/mdhelp/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mdhelp").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist.
    /// On macOS, checks ~/.config/mdhelp first.
    ///
    /// A malformed file is returned as an error so the caller can report it
    /// once logging is up.
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(target_os = "macos")]
        {
            if let Some(config) = Self::xdg_config_path()
                .map(|path| Self::load_from(&path))
                .transpose()?
                .flatten()
            {
                return Ok(config);
            }
        }

        Ok(Self::config_path()
            .map(|path| Self::load_from(&path))
            .transpose()?
            .flatten()
            .unwrap_or_default())
    }

    /// Read a single config file. A missing or unreadable file yields `None`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let Ok(contents) = fs::read_to_string(path) else {
            return Ok(None);
        };
        toml::from_str(&contents)
            .map(Some)
            .map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// A config file that exists but does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config file {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.render.color, Mode::Auto);
    }

    #[test]
    fn test_render_section() {
        let config: Config = toml::from_str(
            r#"
            [render]
            columns = 100
            color = "never"
            images = "always"
            image_size = "40,auto"
            "#,
        )
        .unwrap();

        assert_eq!(config.render.columns, Some(100));
        assert_eq!(config.render.color, Mode::Never);
        assert_eq!(config.render.images, Mode::Always);
        assert_eq!(config.render.image_size.as_deref(), Some("40,auto"));
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_mode_resolution() {
        assert!(Mode::Auto.resolve(true));
        assert!(!Mode::Auto.resolve(false));
        assert!(Mode::Always.resolve(false));
        assert!(!Mode::Never.resolve(true));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(Config::load_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_invalid_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[render]\ncolumns = \"wide\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut config = Config::default();
        config.render.columns = Some(72);
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
    }
}
