use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::probe_config::Settings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("{name} must be at least 1")]
    OutOfRange { name: &'static str },
}

/// Loads `.env` into the environment; a missing file is fine, a broken one is logged.
pub fn load_dotenv() {
    if let Some(warning) = dotenv_warning(dotenvy::dotenv()) {
        log::warn!("{warning}");
    }
}

fn dotenv_warning<T>(result: Result<T, dotenvy::Error>) -> Option<String> {
    match result {
        Err(e) if !e.not_found() => Some(format!("Ignoring .env file: {e}")),
        _ => None,
    }
}

/// Rejects settings no run could succeed with.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.probe.timeout_seconds == 0 {
        return Err(ConfigError::OutOfRange {
            name: "probe.timeout_seconds",
        });
    }
    Ok(())
}

/// Load the settings from a YAML file and apply environment overrides.
/// A missing file is not an error; every setting then keeps its default.
/// Recognised overrides are `STORE_FILE`, `PROBE_TIMEOUT_SECONDS` and `PROBE_CONCURRENCY`.
pub fn load_settings(config_file: &Path) -> Result<Settings, ConfigError> {
    let mut settings = read_settings(config_file)?;
    apply_env_overrides(&mut settings, |name| env::var(name).ok())?;
    validate(&settings)?;

    log::info!(
        "Probing with timeout {}s and concurrency {}",
        settings.probe.timeout_seconds,
        settings.probe.concurrency
    );
    Ok(settings)
}

pub fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let config_str = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("No config file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if config_str.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(store) = lookup("STORE_FILE") {
        settings.store_path = store;
    }
    if let Some(value) = lookup("PROBE_TIMEOUT_SECONDS") {
        settings.probe.timeout_seconds = parse_env("PROBE_TIMEOUT_SECONDS", &value)?;
    }
    if let Some(value) = lookup("PROBE_CONCURRENCY") {
        settings.probe.concurrency = parse_env("PROBE_CONCURRENCY", &value)?;
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}
