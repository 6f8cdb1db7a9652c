//! TOML configuration.
//!
//! ```toml
//! [ephemeris]
//! path = "/usr/share/swisseph"
//!
//! [observer]
//! latitude = 51.5074
//! longitude = -0.1278
//!
//! [calendar]
//! name = "Cosmic Calendar"
//! tracked_bodies = ["Sun", "Moon", "Mercury"]
//! ```
//!
//! Every section and field is optional.

use crate::ephemeris::Body;
use crate::time::{Observer, ObserverError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid observer: {0}")]
    Observer(#[from] ObserverError),
    #[error("Invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EphemerisConfig {
    /// Swiss Ephemeris data directory; Moshier mode when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Calendar header text and the bodies the year scan tracks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_product_id")]
    pub product_id: String,
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_event_duration_minutes")]
    pub event_duration_minutes: u32,
    #[serde(default = "default_tracked_bodies")]
    pub tracked_bodies: Vec<Body>,
}

fn default_name() -> String {
    "Cosmic Calendar".to_string()
}

fn default_description() -> String {
    "Moon phases, retrogrades, and planetary transits".to_string()
}

fn default_product_id() -> String {
    "-//Selene//Cosmic Calendar//EN".to_string()
}

fn default_uid_domain() -> String {
    "selene.local".to_string()
}

fn default_location() -> String {
    "Earth".to_string()
}

fn default_category() -> String {
    "Cosmic Events".to_string()
}

fn default_event_duration_minutes() -> u32 {
    60
}

fn default_tracked_bodies() -> Vec<Body> {
    Body::PLANETS.to_vec()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            product_id: default_product_id(),
            uid_domain: default_uid_domain(),
            location: default_location(),
            category: default_category(),
            event_duration_minutes: default_event_duration_minutes(),
            tracked_bodies: default_tracked_bodies(),
        }
    }
}

impl CalendarConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_duration_minutes == 0 {
            return Err(ConfigError::Invalid {
                field: "calendar.event_duration_minutes",
                message: "must be at least one minute".to_string(),
            });
        }
        if let Some(angle) = self.tracked_bodies.iter().find(|b| b.is_angle()) {
            return Err(ConfigError::Invalid {
                field: "calendar.tracked_bodies",
                message: format!("{} depends on the observer and cannot be tracked", angle),
            });
        }
        if self.uid_domain.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "calendar.uid_domain",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeleneConfig {
    #[serde(default)]
    pub ephemeris: EphemerisConfig,
    #[serde(default)]
    pub observer: Observer,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

impl SeleneConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SeleneConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.observer.validate()?;
        self.calendar.validate()
    }
}
