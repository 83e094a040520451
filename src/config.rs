//! Application-level configuration loading: challenge catalog, countdown
//! interval and store location.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::{
    challenge::{ChallengeCatalog, ChallengeConfig},
    engine::DEFAULT_TICK_INTERVAL,
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "CODE_DARK_BACK_CONFIG_PATH";
/// Environment variable that overrides the configured store file.
const STORE_PATH_ENV: &str = "CODE_DARK_BACK_STORE_PATH";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    challenges: ChallengeCatalog,
    tick_interval: Duration,
    store_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in
    /// defaults when the file is missing or invalid.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        challenges = config.challenges.len(),
                        tick_interval_ms = config.tick_interval.as_millis() as u64,
                        "loaded configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        match env::var_os(STORE_PATH_ENV).filter(|value| !value.is_empty()) {
            Some(store_path) => config.with_store_path(PathBuf::from(store_path)),
            None => config,
        }
    }

    /// Parse a configuration document.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Replace the store location.
    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store_path = Some(path);
        self
    }

    /// Challenge catalog offered to players.
    pub fn challenges(&self) -> &ChallengeCatalog {
        &self.challenges
    }

    /// Period between countdown firings.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// JSON file backing the store, or `None` to keep sessions in memory.
    pub fn store_path(&self) -> Option<&PathBuf> {
        self.store_path.as_ref()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            challenges: ChallengeCatalog::default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            store_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    challenges: Vec<ChallengeConfig>,
    #[serde(default)]
    tick_interval_ms: Option<u64>,
    #[serde(default)]
    store_path: Option<PathBuf>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let tick_interval = value
            .tick_interval_ms
            .filter(|ms| *ms > 0)
            .map_or(DEFAULT_TICK_INTERVAL, Duration::from_millis);

        Self {
            challenges: ChallengeCatalog::new(value.challenges),
            tick_interval,
            store_path: value.store_path,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config.tick_interval(), DEFAULT_TICK_INTERVAL);
        assert_eq!(config.challenges(), &ChallengeCatalog::default());
        assert!(config.store_path().is_none());
    }

    #[test]
    fn explicit_values_are_applied() {
        let config = AppConfig::from_json(
            r#"{
                "challenges": [
                    { "name": "grid", "title": "Grid", "target_url": "/grid.png" }
                ],
                "tick_interval_ms": 50,
                "store_path": "data/session.json"
            }"#,
        )
        .unwrap();

        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.challenges().first().name, "grid");
        assert_eq!(config.challenges().len(), 1);
        assert_eq!(
            config.store_path(),
            Some(&PathBuf::from("data/session.json"))
        );
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let config = AppConfig::from_json(r#"{ "tick_interval_ms": 0 }"#).unwrap();
        assert_eq!(config.tick_interval(), DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(AppConfig::from_json(r#"{ "challenges": 3 }"#).is_err());
    }
}
