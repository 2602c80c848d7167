//! Configuration management for CV data loading
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (cv.toml)
//! - Environment variables (CV__*)
//!
//! ## Example config file (cv.toml):
//! ```toml
//! [source]
//! path = "data/cv.json"
//!
//! [diagnostics]
//! environment = "production"
//! verbose_warnings = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CvConfig {
    /// Where the CV document is read from
    #[serde(default)]
    pub source: SourceConfig,

    /// Diagnostic output settings
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the CV JSON file
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
}

/// Build environment the loader runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildEnv {
    #[default]
    Development,
    Production,
}

/// Diagnostics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub environment: BuildEnv,

    /// Overrides the environment's default for warning output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose_warnings: Option<bool>,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("cv.json")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_source_path(),
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            environment: BuildEnv::Development,
            verbose_warnings: None,
        }
    }
}

impl DiagnosticsConfig {
    /// Whether validation warnings should be logged.
    ///
    /// On in development, off in production, unless `verbose_warnings` is set.
    pub fn warnings_enabled(&self) -> bool {
        self.verbose_warnings
            .unwrap_or(self.environment == BuildEnv::Development)
    }
}

impl CvConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["cv.toml", ".cv.toml", "config/cv.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "cv-data") {
            let xdg_config = config_dir.config_dir().join("cv.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // CV__SOURCE__PATH, CV__DIAGNOSTICS__ENVIRONMENT, ...
        builder = builder.add_source(
            Environment::with_prefix("CV")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the source path (resolves relative paths)
    pub fn source_path(&self) -> PathBuf {
        if self.source.path.is_absolute() {
            self.source.path.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.source.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CvConfig::default();
        assert_eq!(config.source.path, PathBuf::from("cv.json"));
        assert_eq!(config.diagnostics.environment, BuildEnv::Development);
        assert!(config.diagnostics.warnings_enabled());
    }

    #[test]
    fn test_production_silences_warnings() {
        let mut diagnostics = DiagnosticsConfig {
            environment: BuildEnv::Production,
            verbose_warnings: None,
        };
        assert!(!diagnostics.warnings_enabled());

        diagnostics.verbose_warnings = Some(true);
        assert!(diagnostics.warnings_enabled());
    }

    #[test]
    fn test_serialize_config() {
        let config = CvConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[diagnostics]"));
        assert!(toml_str.contains("environment = \"development\""));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[source]\npath = \"data/resume.json\"\n\n[diagnostics]\nenvironment = \"production\"\n",
        )
        .unwrap();

        let config = CvConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.source.path, PathBuf::from("data/resume.json"));
        assert_eq!(config.diagnostics.environment, BuildEnv::Production);
    }

    #[test]
    fn test_save_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = CvConfig::default();
        config.diagnostics.verbose_warnings = Some(false);
        config.save(path.to_str().unwrap()).unwrap();

        let loaded = CvConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.diagnostics.verbose_warnings, Some(false));
    }
}
