pub mod model;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

pub use model::{AppConfig, LoggingConfig};

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lemon-squeezer")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let mut config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config file")?;
    if config.ui.normalize() {
        warn!("invalid ui.timestamp_format in {}, using the default", path.display());
    }
    Ok(config)
}

/// Write the default config on first run so there is a file to edit.
/// Returns `true` if a file was created.
pub fn write_default_config() -> Result<bool> {
    write_default_config_to(&config_path())
}

pub fn write_default_config_to(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config_to(&AppConfig::default(), path)?;
    Ok(true)
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("lemon-squeezer-missing").join("none.toml");
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.squeeze.delay_ms, 500);
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("lemon-squeezer-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.squeeze.delay_ms = 42;
        save_config_to(&cfg, &path).unwrap();
        let back = load_config_from(&path).unwrap();
        assert_eq!(back.squeeze.delay_ms, 42);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_default_config_written_once() {
        let dir = std::env::temp_dir().join(format!("lemon-squeezer-first-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        let _ = std::fs::remove_dir_all(&dir);

        assert!(write_default_config_to(&path).unwrap());
        let written = load_config_from(&path).unwrap();
        assert_eq!(written.squeeze.delay_ms, 500);
        assert_eq!(written.ui.timestamp_format, "%H:%M:%S");

        let mut edited = written.clone();
        edited.squeeze.delay_ms = 900;
        save_config_to(&edited, &path).unwrap();
        assert!(!write_default_config_to(&path).unwrap());
        assert_eq!(load_config_from(&path).unwrap().squeeze.delay_ms, 900);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_timestamp_format_is_replaced_on_load() {
        let dir = std::env::temp_dir().join(format!("lemon-squeezer-ts-{}", std::process::id()));
        let path = dir.join("config.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[ui]\ntimestamp_format = \"%Q %H\"").unwrap();
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.ui.timestamp_format, "%H:%M:%S");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = std::env::temp_dir().join(format!("lemon-squeezer-bad-{}", std::process::id()));
        let path = dir.join("config.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[squeeze\ndelay_ms = ").unwrap();
        assert!(load_config_from(&path).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/var/log"), PathBuf::from("/var/log"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/logs"), home.join("logs"));
        }
    }
}
