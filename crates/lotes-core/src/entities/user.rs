use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AppRole;

/// A registered user and their privacy consents.
///
/// `cpf` is the bare 11-digit number and cannot be changed after registration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub cpf: String,
    pub name: String,
    pub email: Option<String>,
    pub role: AppRole,
    pub privacy_consent: bool,
    pub access_log_consent: bool,
    pub consented_at: Option<DateTime<Utc>>,
    pub policy_version: Option<String>,
    pub created_at: DateTime<Utc>,
}
