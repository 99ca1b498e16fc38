use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::carousel;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "pitchdeck";

pub const KEYS: &[&str] = &[
    "defaults.transition",
    "defaults.start_mode",
    "defaults.window",
    "carousel.interval_ms",
    "carousel.resume_ms",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carousel: Option<CarouselConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_ms: Option<u64>,
}

/// Where the presenter opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    First,
    Index,
    /// 1-based slide number.
    Slide(usize),
}

impl StartMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first" => Some(Self::First),
            "index" => Some(Self::Index),
            n => n.parse::<usize>().ok().filter(|n| *n > 0).map(Self::Slide),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `pitchdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# pitchdeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.transition" => {
                match value {
                    "slide" | "fade" | "none" => {}
                    _ => anyhow::bail!(
                        "Invalid transition: {value}. Must be 'slide', 'fade', or 'none'."
                    ),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .transition = Some(value.to_string());
            }
            "defaults.start_mode" => {
                if StartMode::parse(value).is_none() {
                    anyhow::bail!(
                        "Invalid start_mode: {value}. Must be 'first', 'index', or a slide number."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_mode = Some(value.to_string());
            }
            "defaults.window" => {
                match value {
                    "fullscreen" | "windowed" => {}
                    _ => anyhow::bail!(
                        "Invalid window mode: {value}. Must be 'fullscreen' or 'windowed'."
                    ),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .window = Some(value.to_string());
            }
            "carousel.interval_ms" => {
                let ms = parse_millis(key, value)?;
                self.carousel
                    .get_or_insert_with(CarouselConfig::default)
                    .interval_ms = Some(ms);
            }
            "carousel.resume_ms" => {
                let ms = parse_millis(key, value)?;
                self.carousel
                    .get_or_insert_with(CarouselConfig::default)
                    .resume_ms = Some(ms);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }

    pub fn transition(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.transition.as_deref())
    }

    /// Unparseable values fall back to the first slide.
    pub fn start_mode(&self) -> StartMode {
        self.defaults
            .as_ref()
            .and_then(|d| d.start_mode.as_deref())
            .and_then(StartMode::parse)
            .unwrap_or(StartMode::First)
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.window.as_deref())
            .is_some_and(|w| w == "windowed")
    }

    pub fn carousel_interval(&self) -> Duration {
        self.carousel
            .as_ref()
            .and_then(|c| c.interval_ms)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(carousel::DEFAULT_INTERVAL)
    }

    pub fn carousel_resume_after(&self) -> Duration {
        self.carousel
            .as_ref()
            .and_then(|c| c.resume_ms)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(carousel::DEFAULT_RESUME_AFTER)
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be a positive number of milliseconds."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_accepts_valid_values() {
        let mut config = Config::default();
        config.set("defaults.transition", "fade").unwrap();
        config.set("defaults.start_mode", "index").unwrap();
        config.set("defaults.window", "windowed").unwrap();
        config.set("carousel.interval_ms", "2500").unwrap();
        config.set("carousel.resume_ms", "6000").unwrap();

        assert_eq!(config.transition(), Some("fade"));
        assert_eq!(config.start_mode(), StartMode::Index);
        assert!(config.windowed());
        assert_eq!(config.carousel_interval(), Duration::from_millis(2500));
        assert_eq!(config.carousel_resume_after(), Duration::from_secs(6));
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.transition", "spatial").is_err());
        assert!(config.set("defaults.start_mode", "0").is_err());
        assert!(config.set("defaults.start_mode", "overview").is_err());
        assert!(config.set("defaults.window", "maximized").is_err());
        assert!(config.set("carousel.interval_ms", "0").is_err());
        assert!(config.set("carousel.resume_ms", "soon").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn set_rejects_unknown_keys() {
        let mut config = Config::default();
        let err = config.set("defaults.theme", "dark").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
        assert!(err.to_string().contains("carousel.resume_ms"));
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::default();
        assert_eq!(config.transition(), None);
        assert_eq!(config.start_mode(), StartMode::First);
        assert!(!config.windowed());
        assert_eq!(config.carousel_interval(), carousel::DEFAULT_INTERVAL);
        assert_eq!(config.carousel_resume_after(), carousel::DEFAULT_RESUME_AFTER);
    }

    #[test]
    fn zero_timings_in_file_fall_back_to_defaults() {
        let config: Config =
            serde_yaml::from_str("carousel:\n  interval_ms: 0\n  resume_ms: 0\n").unwrap();
        assert_eq!(config.carousel_interval(), carousel::DEFAULT_INTERVAL);
        assert_eq!(config.carousel_resume_after(), carousel::DEFAULT_RESUME_AFTER);
    }

    #[test]
    fn start_mode_parsing() {
        assert_eq!(StartMode::parse("first"), Some(StartMode::First));
        assert_eq!(StartMode::parse("7"), Some(StartMode::Slide(7)));
        assert_eq!(StartMode::parse("0"), None);
        assert_eq!(StartMode::parse("-1"), None);
    }

    #[test]
    fn yaml_round_trip_skips_unset_sections() {
        let mut config = Config::default();
        config.set("carousel.interval_ms", "3000").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("defaults"));
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn save_and_load_from_file() {
        let dir = std::env::temp_dir().join(format!("pitchdeck-config-{}", std::process::id()));
        let path = dir.join(FILENAME);
        let mut config = Config::default();
        config.set("defaults.start_mode", "3").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.start_mode(), StartMode::Slide(3));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_has_helpful_message() {
        let err = Config::load_from(Path::new("/nonexistent/pitchdeck.yaml")).unwrap_err();
        assert!(err.to_string().contains("pitchdeck config show"));
    }
}
