//! Configuration management for littlelog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::repository::Timeline;
use crate::voice::RecognitionSettings;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name.
const APP_DIR_NAME: &str = "littlelog";

/// Environment variable prefix.
const ENV_PREFIX: &str = "LITTLELOG_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `LITTLELOG_`, `__` between levels)
/// 2. TOML config file at `~/.config/littlelog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timeline configuration.
    pub timeline: TimelineConfig,
    /// Voice capture configuration.
    pub voice: VoiceConfig,
    /// Data configuration.
    pub data: DataConfig,
}

/// Timeline-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Month shown when none is given. `None` means the current month.
    pub start_date: Option<NaiveDate>,
    /// Entry type filter applied when none is given; `"all"` for none.
    pub default_filter: String,
}

/// Voice-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Recognition language (BCP 47).
    pub language: String,
    /// Keep listening across pauses.
    pub continuous: bool,
    /// Deliver interim results.
    pub interim_results: bool,
    /// Pause before summarizing a transcript, in milliseconds.
    pub processing_delay_ms: u64,
    /// Capacity of the engine event channel.
    pub channel_capacity: usize,
}

/// Data-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Load the sample journal on startup.
    pub seed_sample_data: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            // The sample timeline lives in January 2024.
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            default_filter: crate::filter::ALL.to_string(),
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            continuous: true,
            interim_results: true,
            processing_delay_ms: 1500,
            channel_capacity: 32,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let config: Config = Self::figment(config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.voice.language.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "voice.language must not be empty".to_string(),
            });
        }

        if self.voice.channel_capacity == 0 {
            return Err(Error::ConfigValidation {
                message: "voice.channel_capacity must be greater than 0".to_string(),
            });
        }

        if !Timeline::accepts_filter(&self.timeline.default_filter) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "timeline.default_filter '{}' is not 'all' or an entry type",
                    self.timeline.default_filter
                ),
            });
        }

        Ok(())
    }

    /// The date whose month is shown by default.
    #[must_use]
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        self.timeline.start_date.unwrap_or(today)
    }

    /// Recognition settings for the speech engine.
    #[must_use]
    pub fn recognition_settings(&self) -> RecognitionSettings {
        RecognitionSettings {
            language: self.voice.language.clone(),
            continuous: self.voice.continuous,
            interim_results: self.voice.interim_results,
        }
    }

    /// Get the processing delay as a Duration.
    #[must_use]
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.voice.processing_delay_ms)
    }
}
