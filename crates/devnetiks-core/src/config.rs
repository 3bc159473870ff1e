//! # Portal Settings
//!
//! Currency and navigation settings shared by the money and access modules.
//!
//! ## Settings File Format
//! ```toml
//! # devnetiks.toml
//! [currency]
//! code = "USD"
//! locale = "en-US"
//! default_tax_rate = 8.875
//!
//! [navigation]
//! admin_prefix = "/app"
//! client_prefix = "/client"
//! login_path = "/login"
//! start_path = "/start"
//! ```
//!
//! This module only parses and checks settings. Finding the file and
//! applying environment overrides is the binary's job.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::TaxRate;
use crate::validation::validate_tax_rate;

// =============================================================================
// Currency Settings
// =============================================================================

/// How amounts are displayed and which tax rate new invoices start with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// ISO 4217 code.
    #[serde(default = "default_currency_code")]
    pub code: String,

    /// BCP 47 locale tag used by `format_cents`.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Percentage applied when a draft names no rate.
    #[serde(default = "TaxRate::zero")]
    pub default_tax_rate: TaxRate,
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            code: default_currency_code(),
            locale: default_locale(),
            default_tax_rate: TaxRate::zero(),
        }
    }
}

// =============================================================================
// Navigation Settings
// =============================================================================

/// Route prefixes for the two portal areas and the public entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSettings {
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,

    #[serde(default = "default_client_prefix")]
    pub client_prefix: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default = "default_start_path")]
    pub start_path: String,
}

fn default_admin_prefix() -> String {
    "/app".to_string()
}

fn default_client_prefix() -> String {
    "/client".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_start_path() -> String {
    "/start".to_string()
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            admin_prefix: default_admin_prefix(),
            client_prefix: default_client_prefix(),
            login_path: default_login_path(),
            start_path: default_start_path(),
        }
    }
}

impl NavigationSettings {
    /// Joins `segment` onto the admin prefix (`projects` -> `/app/projects`).
    pub fn admin_path(&self, segment: &str) -> String {
        join_path(&self.admin_prefix, segment)
    }

    /// Joins `segment` onto the client prefix.
    pub fn client_path(&self, segment: &str) -> String {
        join_path(&self.client_prefix, segment)
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let segment = segment.trim_start_matches('/');
    if segment.is_empty() {
        return prefix.to_string();
    }
    format!("{}/{}", prefix, segment)
}

// =============================================================================
// Portal Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalSettings {
    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub navigation: NavigationSettings,
}

impl PortalSettings {
    /// Parses settings from TOML text. Missing sections fall back to defaults.
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the settings.
    pub fn validate(&self) -> CoreResult<()> {
        let code = self.currency.code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::InvalidSettings(format!(
                "currency code must be three letters, got: '{}'",
                self.currency.code
            )));
        }

        if self.currency.locale.trim().is_empty() {
            return Err(CoreError::InvalidSettings("locale must not be empty".into()));
        }

        validate_tax_rate(self.currency.default_tax_rate).map_err(|err| {
            CoreError::InvalidSettings(format!(
                "default_tax_rate {}: {}",
                self.currency.default_tax_rate, err
            ))
        })?;

        let nav = &self.navigation;
        for (name, path) in [
            ("admin_prefix", &nav.admin_prefix),
            ("client_prefix", &nav.client_prefix),
            ("login_path", &nav.login_path),
            ("start_path", &nav.start_path),
        ] {
            if !path.starts_with('/') {
                return Err(CoreError::InvalidSettings(format!(
                    "{} must start with '/', got: '{}'",
                    name, path
                )));
            }
        }

        if nav.admin_prefix.trim_end_matches('/') == nav.client_prefix.trim_end_matches('/') {
            return Err(CoreError::InvalidSettings(
                "admin_prefix and client_prefix must differ".into(),
            ));
        }

        Ok(())
    }
}
