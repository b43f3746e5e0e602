//! Showcase configuration, loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slider::mapping::MIN_STEP;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Chance in `[0, 1]` that an uploading file fails on a given tick.
    pub failure_rate: f64,
    pub max_concurrent: usize,
    pub max_file_bytes: u64,
    /// Lowercase, without the dot. Empty allows everything.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            failure_rate: 0.1,
            max_concurrent: 2,
            max_file_bytes: 25 * 1024 * 1024,
            allowed_extensions: ["png", "jpg", "pdf", "csv", "txt"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub show_ticks: bool,
    pub default_step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            show_ticks: false,
            default_step: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub tick_rate_ms: u64,
    pub seed: u64,
    pub upload: UploadConfig,
    pub sliders: SliderConfig,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            seed: 42,
            upload: UploadConfig::default(),
            sliders: SliderConfig::default(),
        }
    }
}

impl ShowcaseConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive".into()));
        }
        let rate = self.upload.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Invalid(format!(
                "upload.failure_rate must be within [0, 1], got {rate}"
            )));
        }
        if self.upload.max_concurrent == 0 {
            return Err(ConfigError::Invalid(
                "upload.max_concurrent must be at least 1".into(),
            ));
        }
        let step = self.sliders.default_step;
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sliders.default_step must be positive, got {step}"
            )));
        }
        if step < MIN_STEP {
            return Err(ConfigError::Invalid(format!(
                "sliders.default_step must be at least {MIN_STEP}, got {step}"
            )));
        }
        Ok(())
    }

    /// `<config_dir>/dashkit/dashkit.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("dashkit").join("dashkit.toml"))
    }

    /// An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate() {
        assert!(ShowcaseConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = ShowcaseConfig::from_toml(
            r#"
            seed = 7

            [upload]
            failure_rate = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.upload.failure_rate, 0.5);
        assert_eq!(config.upload.max_concurrent, 2);
        assert_eq!(config.tick_rate_ms, 250);
        assert!(!config.sliders.show_ticks);
    }

    #[test]
    fn rejects_invalid_values() {
        for bad in [
            "tick_rate_ms = 0",
            "[upload]\nfailure_rate = 1.5",
            "[upload]\nmax_concurrent = 0",
            "[sliders]\ndefault_step = -1.0",
            "[sliders]\nshow_ticks = true\ndefault_step = 1e-20",
        ] {
            let err = ShowcaseConfig::from_toml(bad).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn parse_error_is_typed() {
        let err = ShowcaseConfig::from_toml("seed = \"nope\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_rate_ms = 100\n[sliders]\nshow_ticks = true").unwrap();
        let config = ShowcaseConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.tick_rate_ms, 100);
        assert!(config.sliders.show_ticks);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShowcaseConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn toml_dump_parses_back() {
        let config = ShowcaseConfig::default();
        assert_eq!(ShowcaseConfig::from_toml(&config.to_toml()).unwrap(), config);
    }
}
