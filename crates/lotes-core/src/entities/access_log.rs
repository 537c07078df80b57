use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A user viewed a parcel. Rows are never deleted; anonymization masks `user_cpf`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AccessLog {
    pub id: String,
    pub parcel_id: String,
    pub user_cpf: String,
    pub accessed_at: DateTime<Utc>,
}

impl AccessLog {
    /// `placeholder` is the configured `privacy.anonymized_placeholder`.
    #[must_use]
    pub fn is_anonymized(&self, placeholder: &str) -> bool {
        self.user_cpf == placeholder
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::cpf::ANONYMIZED_CPF;

    fn log(user_cpf: &str) -> AccessLog {
        AccessLog {
            id: "acc-0000000a".to_string(),
            parcel_id: "lot-0000000a".to_string(),
            user_cpf: user_cpf.to_string(),
            accessed_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn anonymized_against_the_given_placeholder() {
        assert!(log(ANONYMIZED_CPF).is_anonymized(ANONYMIZED_CPF));
        assert!(log("[removed]").is_anonymized("[removed]"));
        assert!(!log("[removed]").is_anonymized(ANONYMIZED_CPF));
        assert!(!log("52998224725").is_anonymized("[removed]"));
    }
}
