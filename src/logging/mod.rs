//! Diagnostics and the squeeze journal.
//!
//! The terminal belongs to the UI, so tracing output goes to
//! `<log_dir>/lemon-squeezer.log` when enabled. The journal is a separate,
//! human-readable record of store changes written to daily files named
//! `squeezes_<date>.log` in the same directory.

use crate::config::{expand_home, LoggingConfig};
use crate::squeezer::format::describe_change;
use crate::squeezer::StoreChange;
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Returns `false` when logging is
/// disabled in the config.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    if !config.enabled {
        return Ok(false);
    }
    let log_dir = expand_home(&config.log_dir);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let path = log_dir.join("lemon-squeezer.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;
    Ok(true)
}

/// Appends store changes to a daily journal file.
///
/// The file handle is kept open until the date rolls over. A file that
/// cannot be opened disables the journal for the rest of the session.
pub struct SqueezeJournal {
    enabled: bool,
    log_dir: PathBuf,
    current: Option<(String, File)>,
}

impl SqueezeJournal {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.journal,
            log_dir: expand_home(&config.log_dir),
            current: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record(&mut self, change: &StoreChange) {
        if !self.enabled {
            return;
        }
        let now = chrono::Local::now();
        let date = now.format("%Y-%m-%d").to_string();
        let line = format!("[{}] {}", now.format("%H:%M:%S"), describe_change(change));

        if self.current.as_ref().map(|(d, _)| d != &date).unwrap_or(true) {
            match self.open(&date) {
                Ok(file) => self.current = Some((date, file)),
                Err(e) => {
                    warn!(error = %e, "squeeze journal disabled");
                    self.enabled = false;
                    self.current = None;
                    return;
                }
            }
        }

        if let Some((_, file)) = self.current.as_mut() {
            if let Err(e) = writeln!(file, "{}", line) {
                warn!(error = %e, "failed to write squeeze journal");
            }
        }
    }

    fn open(&self, date: &str) -> Result<File> {
        fs::create_dir_all(&self.log_dir).with_context(|| {
            format!("Failed to create journal directory {}", self.log_dir.display())
        })?;
        let path = self.log_dir.join(format!("squeezes_{}.log", date));
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open journal {}", path.display()))
    }
}
