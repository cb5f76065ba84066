//! Optional user configuration.
//!
//! Read from `~/.config/lantern/config.toml` (or `$XDG_CONFIG_HOME/lantern/`).
//! Every key is optional; command-line flags override file values.
//!
//! ```toml
//! color = "#ff8800"
//! secondary = "teal"
//! brightness = 60.0
//! device = "PM1234567890"
//! top_interval_ms = 250
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use razer_device::RgbColor;
use serde::Deserialize;

use crate::color::{self, ColorError};

pub const DEFAULT_PRIMARY: &str = "#ff0000";
pub const DEFAULT_SECONDARY: &str = "#00ff00";
pub const DEFAULT_TOP_INTERVAL_MS: u64 = 300;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Primary color
    pub color: Option<String>,
    /// Secondary color (dual effects)
    pub secondary: Option<String>,
    /// Brightness to apply on every run (0-100)
    pub brightness: Option<f64>,
    /// Serial of the device to control
    pub device: Option<String>,
    /// CPU meter refresh interval
    pub top_interval_ms: Option<u64>,
}

impl Config {
    /// Parse from TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("parse TOML")?;
        if let Some(b) = config.brightness {
            if !(0.0..=100.0).contains(&b) {
                bail!("brightness must be 0-100, got {b}");
            }
        }
        Ok(config)
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields the empty config; an explicitly given
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path(), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("load {}", path.display()))
    }

    /// Values from `other` win where set.
    pub fn overlay(self, other: Config) -> Config {
        Config {
            color: other.color.or(self.color),
            secondary: other.secondary.or(self.secondary),
            brightness: other.brightness.or(self.brightness),
            device: other.device.or(self.device),
            top_interval_ms: other.top_interval_ms.or(self.top_interval_ms),
        }
    }

    pub fn primary(&self) -> Result<RgbColor, ColorError> {
        color::parse(self.color.as_deref().unwrap_or(DEFAULT_PRIMARY))
    }

    pub fn secondary(&self) -> Result<RgbColor, ColorError> {
        color::parse(self.secondary.as_deref().unwrap_or(DEFAULT_SECONDARY))
    }

    pub fn top_interval(&self) -> Duration {
        Duration::from_millis(
            self.top_interval_ms
                .unwrap_or(DEFAULT_TOP_INTERVAL_MS)
                .max(1),
        )
    }
}

/// Path to the default config file.
pub fn default_config_path() -> PathBuf {
    dirs_path().join("config.toml")
}

fn dirs_path() -> PathBuf {
    if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(config).join("lantern")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config/lantern")
    } else {
        PathBuf::from("/tmp/lantern")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.primary(), Ok(RgbColor::RED));
        assert_eq!(config.secondary(), Ok(RgbColor::GREEN));
        assert_eq!(config.top_interval(), Duration::from_millis(300));
    }

    #[test]
    fn test_parse_all_keys() {
        let config = Config::from_toml(
            r##"
            color = "#0000ff"
            secondary = "white"
            brightness = 55.5
            device = "PM42"
            top_interval_ms = 100
            "##,
        )
        .unwrap();

        assert_eq!(config.primary(), Ok(RgbColor::BLUE));
        assert_eq!(config.secondary(), Ok(RgbColor::WHITE));
        assert_eq!(config.brightness, Some(55.5));
        assert_eq!(config.device.as_deref(), Some("PM42"));
        assert_eq!(config.top_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_brightness() {
        assert!(Config::from_toml("colour = \"red\"").is_err());
        assert!(Config::from_toml("brightness = 120.0").is_err());
    }

    #[test]
    fn test_overlay_prefers_flags() {
        let file = Config {
            color: Some("#111111".into()),
            brightness: Some(20.0),
            device: Some("A".into()),
            ..Default::default()
        };
        let flags = Config {
            color: Some("#222222".into()),
            device: None,
            ..Default::default()
        };

        let merged = file.overlay(flags);
        assert_eq!(merged.color.as_deref(), Some("#222222"));
        assert_eq!(merged.brightness, Some(20.0));
        assert_eq!(merged.device.as_deref(), Some("A"));
    }

    #[test]
    fn test_bad_color_reported() {
        let config = Config {
            color: Some("#nothex".into()),
            ..Default::default()
        };
        assert!(config.primary().is_err());
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        assert!(Config::load(Some(Path::new("/nonexistent/lantern.toml"))).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let path = std::env::temp_dir().join(format!("lantern-config-{}.toml", std::process::id()));
        std::fs::write(&path, "brightness = 10.0\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.brightness, Some(10.0));
        std::fs::remove_file(&path).ok();
    }
}
