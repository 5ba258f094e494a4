//! Application-level configuration loading, including the round capacity and
//! admin identities.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "KNOCKOUT_BACK_CONFIG_PATH";
/// Round capacity used when neither the config file nor the environment sets one.
const DEFAULT_MAX_PLAYERS: u32 = 500;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
///
/// Read once at startup; every value is treated as fixed for the process
/// lifetime.
pub struct AppConfig {
    /// Maximum number of players a round can hold.
    pub max_players: u32,
    /// Chat identity (for example `@host`) allowed to run admin chat commands.
    pub admin_username: Option<String>,
    /// Shared secret expected in the `X-Admin-Token` header of admin routes.
    pub admin_token: Option<String>,
    /// Roll the round over automatically once every slot holds a confirmed
    /// player.
    pub auto_reset_on_full: bool,
}

impl AppConfig {
    /// Load the application configuration from disk and the environment,
    /// falling back to built-in defaults.
    ///
    /// Environment variables (`MAX_PLAYERS`, `ADMIN_USERNAME`, `ADMIN_TOKEN`,
    /// `AUTO_RESET_ON_FULL`) take precedence over the config file.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let raw = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration file");
                    raw
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    RawConfig::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                RawConfig::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                RawConfig::default()
            }
        };

        let config: Self = raw.into();
        config.apply_env_overrides()
    }

    fn apply_env_overrides(mut self) -> Self {
        if let Some(value) = env_var("MAX_PLAYERS") {
            match value.parse::<u32>() {
                Ok(parsed) if parsed >= 1 => self.max_players = parsed,
                _ => warn!(%value, "ignoring invalid MAX_PLAYERS override"),
            }
        }
        if let Some(value) = env_var("ADMIN_USERNAME") {
            self.admin_username = Some(value);
        }
        if let Some(value) = env_var("ADMIN_TOKEN") {
            self.admin_token = Some(value);
        }
        if let Some(value) = env_var("AUTO_RESET_ON_FULL") {
            match value.parse::<bool>() {
                Ok(parsed) => self.auto_reset_on_full = parsed,
                Err(_) => warn!(%value, "ignoring invalid AUTO_RESET_ON_FULL override"),
            }
        }

        if self.max_players == 0 {
            warn!("max_players must be at least 1; using default");
            self.max_players = DEFAULT_MAX_PLAYERS;
        }
        if self.admin_token.is_none() {
            warn!("no admin token configured; admin HTTP routes will reject every request");
        }

        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_players: DEFAULT_MAX_PLAYERS,
            admin_username: None,
            admin_token: None,
            auto_reset_on_full: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    max_players: Option<u32>,
    admin_username: Option<String>,
    admin_token: Option<String>,
    auto_reset_on_full: Option<bool>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            max_players: value.max_players.unwrap_or(defaults.max_players),
            admin_username: value.admin_username.or(defaults.admin_username),
            admin_token: value.admin_token.or(defaults.admin_token),
            auto_reset_on_full: value
                .auto_reset_on_full
                .unwrap_or(defaults.auto_reset_on_full),
        }
    }
}

/// Read a non-empty environment variable.
fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
