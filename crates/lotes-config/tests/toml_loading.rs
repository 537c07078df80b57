//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use lotes_config::{ConfigError, LotesConfig};
use pretty_assertions::assert_eq;

#[test]
fn loads_database_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
url = "libsql://parcels.example.io"
auth_token = "db-token"
"#,
        )?;

        let config: LotesConfig = Figment::from(Serialized::defaults(LotesConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.url, "libsql://parcels.example.io");
        assert_eq!(config.database.auth_token, "db-token");
        assert_eq!(config.database.path, ".lotes/lotes.db");
        assert!(config.database.is_remote());
        Ok(())
    });
}

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/lotes/registry.db"

[general]
default_limit = 50
max_images_per_parcel = 4

[privacy]
policy_version = "2.1"
anonymized_placeholder = "[removed]"
access_log_limit = 250
"#,
        )?;

        let config: LotesConfig = Figment::from(Serialized::defaults(LotesConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/lotes/registry.db");
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.general.max_images_per_parcel, 4);
        assert_eq!(config.privacy.policy_version, "2.1");
        assert_eq!(config.privacy.anonymized_placeholder, "[removed]");
        assert_eq!(config.privacy.access_log_limit, 250);
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lotes")?;
        jail.create_file(
            ".lotes/config.toml",
            r#"
[general]
default_limit = 7
"#,
        )?;

        let config = LotesConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("LOTES_DATABASE__PATH", "/tmp/from-env.db");
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/tmp/from-toml.db"
"#,
        )?;

        let config: LotesConfig = Figment::from(Serialized::defaults(LotesConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("LOTES_").split("__"))
            .extract()?;

        assert_eq!(config.database.path, "/tmp/from-env.db");
        Ok(())
    });
}

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("LOTES_PRIVACY__POLICY_VERSION", "3.0");
        jail.set_env("LOTES_GENERAL__DEFAULT_LIMIT", "42");

        let config = LotesConfig::load().expect("config loads");
        assert_eq!(config.privacy.policy_version, "3.0");
        assert_eq!(config.general.default_limit, 42);
        Ok(())
    });
}

#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("LOTES_DATABASE__PATHH", "/tmp/typo.db");

        let config = LotesConfig::load().expect("config loads");
        assert_eq!(config.database.path, ".lotes/lotes.db");
        Ok(())
    });
}

#[test]
fn invalid_value_is_reported_with_field_name() {
    Jail::expect_with(|jail| {
        jail.set_env("LOTES_GENERAL__DEFAULT_LIMIT", "0");

        let err = LotesConfig::load().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "general.default_limit"
        ));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lotes")?;
        jail.create_file(".lotes/config.toml", "[general\ndefault_limit = ")?;

        let err = LotesConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
