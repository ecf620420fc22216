use anyhow::{Context, Result};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Playback synchronization settings
    #[serde(default)]
    pub sync: SyncConfig,

    /// Lyric display settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Playback synchronization settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SyncConfig {
    // @field: Seconds moved by skip forward/backward
    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: f64,

    // @field: Follow intermediate drag positions while scrubbing
    #[serde(default)]
    pub live_scrub_preview: bool,

    // @field: Interval between media time updates in headless playback
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    // @field: Speed multiplier for headless playback
    #[serde(default = "default_playback_rate")]
    pub playback_rate: f64,

    // @field: What happens when the track ends
    #[serde(default)]
    pub repeat: RepeatMode,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            skip_seconds: default_skip_seconds(),
            live_scrub_preview: false,
            tick_interval_ms: default_tick_interval_ms(),
            playback_rate: default_playback_rate(),
            repeat: RepeatMode::default(),
        }
    }
}

/// End-of-track behavior
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop and rewind to the start
    #[default]
    Off,
    /// Restart the same track
    One,
}

impl RepeatMode {
    // @returns: The other mode
    pub fn toggled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Lyric display settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    // @field: Show the compact lyrics list
    #[serde(default = "default_true")]
    pub show_lyrics: bool,

    // @field: Start in the full-screen immersive view
    #[serde(default)]
    pub immersive: bool,

    // @field: Lines printed on each side of the active line
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_lyrics: true,
            immersive: false,
            context_lines: default_context_lines(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_skip_seconds() -> f64 {
    10.0
}

fn default_tick_interval_ms() -> u64 {
    // Roughly the cadence of media time-update events
    250
}

fn default_playback_rate() -> f64 {
    1.0
}

fn default_context_lines() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sync.skip_seconds.is_finite() && self.sync.skip_seconds > 0.0) {
            return Err(ConfigError::InvalidSkipSeconds(self.sync.skip_seconds));
        }

        if self.sync.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval(self.sync.tick_interval_ms));
        }

        if !(self.sync.playback_rate.is_finite() && self.sync.playback_rate > 0.0) {
            return Err(ConfigError::InvalidPlaybackRate(self.sync.playback_rate));
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Load the configuration, writing a default one if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            sync: SyncConfig::default(),
            display: DisplayConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
