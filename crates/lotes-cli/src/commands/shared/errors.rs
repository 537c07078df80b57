use lotes_core::errors::ErrorKind;
use lotes_db::error::DatabaseError;

/// Convert a service error into the message shown to the user.
///
/// Persistence details stay in the log; validation messages pass through.
pub fn user_error(error: DatabaseError) -> anyhow::Error {
    match error.kind() {
        ErrorKind::Persistence => tracing::error!(error = ?error, "persistence failure"),
        ErrorKind::Validation | ErrorKind::Authorization => {
            tracing::debug!(error = %error, "request rejected");
        }
    }
    anyhow::anyhow!(error.user_message())
}
