//! libSQL database configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".lotes/lotes.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file. Ignored when `url` is set.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote libSQL URL (e.g., `libsql://parcels.example.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Remote mode needs both a URL and a token.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    #[must_use]
    pub fn local_path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local() {
        let config = DatabaseConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.local_path(), PathBuf::from(".lotes/lotes.db"));
    }

    #[test]
    fn remote_needs_url_and_token() {
        let mut config = DatabaseConfig {
            url: "libsql://parcels.example.io".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());
        config.auth_token = "token".into();
        assert!(config.is_remote());
    }
}
