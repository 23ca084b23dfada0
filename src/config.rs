//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the inkboard.toml file.
//! It provides canvas dimensions, the weather location and the calendar source.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "inkboard.toml";

/// Default canvas, a 7.5" portrait panel.
pub const DEFAULT_WIDTH: usize = 480;
pub const DEFAULT_HEIGHT: usize = 800;

/// Application configuration loaded from inkboard.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Panel configuration
    pub display: DisplayConfig,
    /// Weather location
    pub weather: WeatherConfig,
    /// Agenda source
    #[serde(default)]
    pub calendar: CalendarConfig,
}

/// Panel dimensions as configured. Use [`DisplayConfig::canvas_size`] rather
/// than the raw fields; they may be zero or negative in a hand-edited file.
#[derive(Debug, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub width: i32,
    /// Panel height in pixels
    pub height: i32,
}

/// Where the weather is fetched for.
#[derive(Debug, Deserialize, Serialize)]
pub struct WeatherConfig {
    pub latitude: f64,
    pub longitude: f64,
    /// Place name shown in the weather band
    pub location: String,
}

/// Agenda source configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// JSON agenda endpoint; when unset the mock agenda is shown
    pub url: Option<String>,
    /// Number of days in the mock agenda
    pub days: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig { url: None, days: 3 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            display: DisplayConfig {
                width: DEFAULT_WIDTH as i32,
                height: DEFAULT_HEIGHT as i32,
            },
            weather: WeatherConfig {
                latitude: 37.7749,
                longitude: -122.4194,
                location: "San Francisco".to_string(),
            },
            calendar: CalendarConfig::default(),
        }
    }
}

impl DisplayConfig {
    /// Canvas `(width, height)`; each non-positive value falls back to its default.
    pub fn canvas_size(&self) -> (usize, usize) {
        let width = if self.width > 0 {
            self.width as usize
        } else {
            DEFAULT_WIDTH
        };
        let height = if self.height > 0 {
            self.height as usize
        } else {
            DEFAULT_HEIGHT
        };
        (width, height)
    }
}

impl Config {
    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(location = %config.weather.location, "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save current configuration to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.canvas_size(), (480, 800));
        assert_eq!(config.weather.location, "San Francisco");
        assert!(config.calendar.url.is_none());
        assert_eq!(config.calendar.days, 3);
    }

    #[test]
    fn test_non_positive_dimensions_fall_back() {
        let display = DisplayConfig {
            width: 0,
            height: -20,
        };
        assert_eq!(display.canvas_size(), (480, 800));

        let display = DisplayConfig {
            width: 800,
            height: 0,
        };
        assert_eq!(display.canvas_size(), (800, 800));
    }

    #[test]
    fn test_config_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.calendar.url = Some("http://localhost:8080/agenda.json".to_string());
        config.save(file.path()).unwrap();

        let parsed = Config::load_from_path(file.path());
        assert_eq!(parsed.weather.location, config.weather.location);
        assert_eq!(parsed.calendar.url, config.calendar.url);
    }

    #[test]
    fn test_calendar_section_is_optional() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            r#"
[display]
width = 600
height = 448

[weather]
latitude = 43.66
longitude = -70.26
location = "Portland, ME"
"#,
        )
        .unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.display.canvas_size(), (600, 448));
        assert_eq!(config.weather.location, "Portland, ME");
        assert!(config.calendar.url.is_none());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "this is = not [valid toml").unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config.weather.location, "San Francisco");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.display.width, 480);
    }
}
