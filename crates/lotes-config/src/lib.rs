//! # lotes-config
//!
//! Layered configuration loading for the parcel registry using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LOTES_*` prefix, `__` as separator)
//! 2. Project-level `.lotes/config.toml`
//! 3. User-level `~/.config/lotes/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LOTES_DATABASE__PATH` -> `database.path`,
//! `LOTES_PRIVACY__POLICY_VERSION` -> `privacy.policy_version`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use lotes_config::LotesConfig;
//!
//! let config = LotesConfig::load().expect("config");
//! if config.database.is_remote() {
//!     println!("remote database: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod general;
mod privacy;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use privacy::PrivacyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".lotes/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LotesConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub privacy: PrivacyConfig,
}

impl LotesConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// `.env` files are not read here; the `lotes` binary loads them first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` on malformed sources and
    /// `ConfigError::InvalidValue` when [`Self::validate`] rejects a value.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer extra
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("LOTES_").split("__"))
    }

    /// Reject values that would make the service misbehave.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.database.is_remote() && self.database.path.trim().is_empty() {
            return Err(ConfigError::invalid(
                "database.path",
                "must be set when no remote url/auth_token is configured",
            ));
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::invalid("general.default_limit", "must be at least 1"));
        }
        if self.privacy.policy_version.trim().is_empty() {
            return Err(ConfigError::invalid("privacy.policy_version", "must not be empty"));
        }
        if self.privacy.anonymized_placeholder.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::invalid(
                "privacy.anonymized_placeholder",
                "must not contain digits",
            ));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lotes").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LotesConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.database.is_remote());
        assert_eq!(config.general.default_limit, 20);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let mut config = LotesConfig::default();
        config.general.default_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.default_limit"));
    }

    #[test]
    fn placeholder_must_not_leak_digits() {
        let mut config = LotesConfig::default();
        config.privacy.anonymized_placeholder = "000.000.000-00".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn remote_database_does_not_need_a_path() {
        let mut config = LotesConfig::default();
        config.database.path = String::new();
        assert!(config.validate().is_err());
        config.database.url = "libsql://parcels.example.io".into();
        config.database.auth_token = "token".into();
        assert!(config.validate().is_ok());
    }
}
