use lotes_config::LotesConfig;

const SECTIONS: [&str; 3] = ["DATABASE", "GENERAL", "PRIVACY"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &LotesConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &LotesConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    for section in SECTIONS {
        let single = format!("LOTES_{section}_");
        let double = format!("LOTES_{section}__");
        if let Some(key) = env_keys
            .iter()
            .find(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            warnings.push(format!(
                "{key} is ignored. Use double underscores between section and field (example: {double}{}).",
                key.trim_start_matches(&single)
            ));
        }
    }

    if config.database.url.is_empty() != config.database.auth_token.is_empty() {
        warnings.push(
            "database.url and database.auth_token must both be set for a remote database; using the local file."
                .to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter().map(|k| ((*k).to_string(), "x".to_string())).collect()
    }

    #[test]
    fn single_underscore_keys_are_flagged() {
        let warnings = collect_unconfigured_warnings(
            &LotesConfig::default(),
            env(&["LOTES_DATABASE_URL", "LOTES_PRIVACY__POLICY_VERSION"]),
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("LOTES_DATABASE__URL"));
    }

    #[test]
    fn half_configured_remote_is_flagged() {
        let mut config = LotesConfig::default();
        config.database.url = "libsql://parcels.example.io".into();
        let warnings = collect_unconfigured_warnings(&config, env(&[]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("auth_token"));
    }

    #[test]
    fn clean_environment_has_no_warnings() {
        let warnings =
            collect_unconfigured_warnings(&LotesConfig::default(), env(&["LOTES_LOG", "HOME"]));
        assert!(warnings.is_empty());
    }
}
