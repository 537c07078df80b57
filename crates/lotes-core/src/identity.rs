use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AppRole;
use crate::errors::CoreError;

/// The acting user for one invocation.
///
/// Built once by `LotesService::session_for` and passed by reference to every
/// service call. Read-only; a profile change takes effect on the next session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: String,
    /// Bare 11-digit CPF.
    pub cpf: String,
    pub name: String,
    pub role: AppRole,
    pub access_log_consent: bool,
}

impl SessionContext {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// # Errors
    ///
    /// Returns `CoreError::Unauthorized` naming `action` when the user is not an admin.
    pub fn require_admin(&self, action: &str) -> Result<(), CoreError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(CoreError::unauthorized(action))
        }
    }
}
