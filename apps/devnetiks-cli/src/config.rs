//! # CLI Configuration
//!
//! Loads [`PortalSettings`] for the command-line front end.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DEVNETIKS_CURRENCY=EUR                                             │
//! │     DEVNETIKS_TAX_RATE=8.875                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/portal/devnetiks.toml (Linux)                            │
//! │     ~/Library/Application Support/com.devnetiks.portal/devnetiks.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     USD, en-US, 0%, /app, /client                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use devnetiks_core::config::PortalSettings;
use devnetiks_core::{CoreError, TaxRate};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

pub const ENV_CURRENCY: &str = "DEVNETIKS_CURRENCY";
pub const ENV_LOCALE: &str = "DEVNETIKS_LOCALE";
pub const ENV_TAX_RATE: &str = "DEVNETIKS_TAX_RATE";
pub const ENV_ADMIN_PREFIX: &str = "DEVNETIKS_ADMIN_PREFIX";
pub const ENV_CLIENT_PREFIX: &str = "DEVNETIKS_CLIENT_PREFIX";

const CONFIG_FILE_NAME: &str = "devnetiks.toml";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error("Environment variable {var} has invalid value '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

// =============================================================================
// App Config
// =============================================================================

/// Effective settings plus where they came from.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppConfig {
    pub settings: PortalSettings,
    /// The file that was read, if any.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist; the platform default path is
    /// optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, |var| std::env::var(var).ok())
    }

    /// Same as [`AppConfig::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(config_path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        match config_path {
            Some(path) => config.read_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => config.read_file(&path)?,
                Some(path) => debug!(?path, "Config file not found, using defaults"),
                None => debug!("No platform config directory, using defaults"),
            },
        }

        config.apply_env_overrides(env)?;
        config.settings.validate()?;

        Ok(config)
    }

    fn read_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        info!(?path, "Loading settings from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.settings =
            PortalSettings::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    fn apply_env_overrides<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let currency = &mut self.settings.currency;
        let navigation = &mut self.settings.navigation;

        if let Some(code) = env(ENV_CURRENCY) {
            debug!(code = %code, "Overriding currency from environment");
            currency.code = code.trim().to_ascii_uppercase();
        }

        if let Some(locale) = env(ENV_LOCALE) {
            debug!(locale = %locale, "Overriding locale from environment");
            currency.locale = locale;
        }

        if let Some(rate) = env(ENV_TAX_RATE) {
            let parsed = rate.parse::<TaxRate>().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TAX_RATE,
                value: rate.clone(),
            })?;
            debug!(rate = %parsed, "Overriding default tax rate from environment");
            currency.default_tax_rate = parsed;
        }

        if let Some(prefix) = env(ENV_ADMIN_PREFIX) {
            debug!(prefix = %prefix, "Overriding admin prefix from environment");
            navigation.admin_prefix = prefix;
        }

        if let Some(prefix) = env(ENV_CLIENT_PREFIX) {
            debug!(prefix = %prefix, "Overriding client prefix from environment");
            navigation.client_prefix = prefix;
        }

        Ok(())
    }
}

/// Returns the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "devnetiks", "portal")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|var| match var {
                ENV_CURRENCY => Some(" eur ".to_string()),
                ENV_TAX_RATE => Some("8.875".to_string()),
                ENV_CLIENT_PREFIX => Some("/portal".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.settings.currency.code, "EUR");
        assert_eq!(
            config.settings.currency.default_tax_rate,
            TaxRate::from_percentage(8.875)
        );
        assert_eq!(config.settings.navigation.client_prefix, "/portal");
        assert_eq!(config.settings.navigation.admin_prefix, "/app");
    }

    #[test]
    fn test_bad_tax_rate_env() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(|var| (var == ENV_TAX_RATE).then(|| "8,25 pct".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_TAX_RATE, .. }));
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(no_env).unwrap();
        assert_eq!(config.settings, PortalSettings::default());
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }
}
