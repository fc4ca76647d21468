//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use crate::squeezer::model::{CitrusSize, JuiceQuality};
use crate::squeezer::stages::StageClicks;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub squeeze: SqueezeConfig,
    #[serde(default)]
    pub stages: StageClicks,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Squeezer behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqueezeConfig {
    /// Delay between starting and completing a squeeze.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Quality shown before anything has been squeezed.
    #[serde(default = "default_empty_quality")]
    pub empty_quality: JuiceQuality,
    /// Add a lemon on startup and after every reset.
    #[serde(default = "default_true")]
    pub start_with_lemon: bool,
    #[serde(default = "default_starting_size")]
    pub starting_size: CitrusSize,
}

impl SqueezeConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn starting_lemon(&self) -> Option<CitrusSize> {
        self.start_with_lemon.then_some(self.starting_size)
    }
}

impl Default for SqueezeConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            empty_quality: default_empty_quality(),
            start_with_lemon: true,
            starting_size: default_starting_size(),
        }
    }
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Lines kept in the activity feed.
    #[serde(default = "default_max_activity")]
    pub max_activity: usize,
    /// Volume that fills the glass gauge.
    #[serde(default = "default_glass_capacity")]
    pub glass_capacity_ml: f64,
    #[serde(default = "default_true")]
    pub show_motivation: bool,
    #[serde(default = "default_true")]
    pub fun_facts: bool,
}

impl UiConfig {
    /// Replace a `timestamp_format` chrono cannot render with the default.
    /// Returns `true` if it was replaced.
    pub fn normalize(&mut self) -> bool {
        let invalid = StrftimeItems::new(&self.timestamp_format).any(|i| matches!(i, Item::Error));
        if invalid {
            self.timestamp_format = default_timestamp_format();
        }
        invalid
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            max_activity: default_max_activity(),
            glass_capacity_ml: default_glass_capacity(),
            show_motivation: true,
            fun_facts: true,
        }
    }
}

/// Diagnostics and squeeze journal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write tracing output to `<log_dir>/lemon-squeezer.log`.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Append completed squeezes to a daily journal file.
    #[serde(default)]
    pub journal: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            level: default_level(),
            journal: false,
        }
    }
}

fn default_delay_ms() -> u64 {
    500
}
fn default_empty_quality() -> JuiceQuality {
    JuiceQuality::Good
}
fn default_starting_size() -> CitrusSize {
    CitrusSize::Medium
}
fn default_true() -> bool {
    true
}
fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_max_activity() -> usize {
    200
}
fn default_glass_capacity() -> f64 {
    500.0
}
fn default_log_dir() -> String {
    "~/.local/share/lemon-squeezer/logs".to_string()
}
fn default_level() -> String {
    "info".to_string()
}
