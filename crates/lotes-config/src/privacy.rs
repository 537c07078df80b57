//! Privacy and consent settings.

use serde::{Deserialize, Serialize};

fn default_policy_version() -> String {
    "1.0".to_string()
}

fn default_placeholder() -> String {
    "***.***.***-**".to_string()
}

const fn default_access_log_limit() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrivacyConfig {
    /// Privacy policy version recorded with each user's consent.
    #[serde(default = "default_policy_version")]
    pub policy_version: String,

    /// Value written over a CPF when access logs are anonymized.
    #[serde(default = "default_placeholder")]
    pub anonymized_placeholder: String,

    /// Default number of rows shown by `lotes logs list`.
    #[serde(default = "default_access_log_limit")]
    pub access_log_limit: u32,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            policy_version: default_policy_version(),
            anonymized_placeholder: default_placeholder(),
            access_log_limit: default_access_log_limit(),
        }
    }
}
