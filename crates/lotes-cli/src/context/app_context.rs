use lotes_config::LotesConfig;
use lotes_core::errors::PERMISSION_DENIED_MESSAGE;
use lotes_core::identity::SessionContext;
use lotes_core::navigation::{Route, RouteDecision, authorize};
use lotes_db::error::DatabaseError;
use lotes_db::service::LotesService;

use crate::commands::shared::errors::user_error;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: LotesService,
    pub config: LotesConfig,
    /// Acting user, resolved once from `--as`. Read-only for the rest of the run.
    pub session: Option<SessionContext>,
}

impl AppContext {
    pub async fn init(config: LotesConfig, as_user: Option<&str>) -> anyhow::Result<Self> {
        super::warn_unconfigured(&config);

        let service = LotesService::from_config(&config)
            .await
            .map_err(open_failure)?;

        let session = match as_user {
            Some(user_id) => Some(service.session_for(user_id).await.map_err(user_error)?),
            None => None,
        };
        if let Some(session) = &session {
            tracing::debug!(user_id = %session.user_id, role = %session.role, "acting user");
        }

        Ok(Self {
            service,
            config,
            session,
        })
    }

    /// Gate a command on its route without requiring a session.
    pub fn check(&self, route: Route) -> anyhow::Result<()> {
        check_route(route, self.session.as_ref())
    }

    /// Gate a command on its route and return the acting user.
    pub fn require(&self, route: Route) -> anyhow::Result<&SessionContext> {
        self.check(route)?;
        self.session
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("{route:?} requires a signed-in user; pass --as <user-id>"))
    }
}

/// libSQL and migration detail goes to the log only.
fn open_failure(error: DatabaseError) -> anyhow::Error {
    tracing::error!(error = ?error, "failed to open the parcel database");
    anyhow::anyhow!("failed to open the parcel database: {}", error.user_message())
}

fn check_route(route: Route, session: Option<&SessionContext>) -> anyhow::Result<()> {
    match authorize(route, session) {
        RouteDecision::Allow => Ok(()),
        RouteDecision::RedirectToAuth => {
            tracing::debug!(path = route.path(), "no session");
            anyhow::bail!(
                "not signed in: pass --as <user-id> (register with `lotes user register`)"
            )
        }
        RouteDecision::RedirectToDashboard => {
            tracing::warn!(path = route.path(), "route needs an admin");
            anyhow::bail!("{PERMISSION_DENIED_MESSAGE}")
        }
    }
}

#[cfg(test)]
mod tests {
    use lotes_core::enums::AppRole;
    use lotes_core::errors::PERSISTENCE_FAILURE_MESSAGE;

    use super::*;

    fn session(role: AppRole) -> SessionContext {
        SessionContext {
            user_id: "usr-0000000c".to_string(),
            cpf: "11144477735".to_string(),
            name: "Bruno".to_string(),
            role,
            access_log_consent: false,
        }
    }

    #[test]
    fn anonymous_is_sent_to_register() {
        let err = check_route(Route::Parcels, None).unwrap_err();
        assert!(err.to_string().contains("--as"));
    }

    #[test]
    fn user_on_admin_route_gets_generic_denial() {
        let err = check_route(Route::AccessLogs, Some(&session(AppRole::User))).unwrap_err();
        assert_eq!(err.to_string(), PERMISSION_DENIED_MESSAGE);
        assert!(check_route(Route::AccessLogs, Some(&session(AppRole::Admin))).is_ok());
    }

    #[test]
    fn public_route_needs_no_session() {
        assert!(check_route(Route::PrivacyPolicy, None).is_ok());
    }

    #[test]
    fn open_failure_hides_storage_detail() {
        let err = open_failure(DatabaseError::Migration(
            "001_initial: near \"CREAT\": syntax error".to_string(),
        ));
        let shown = format!("{err:#}");
        assert!(shown.starts_with("failed to open the parcel database"));
        assert!(shown.contains(PERSISTENCE_FAILURE_MESSAGE));
        assert!(!shown.contains("001_initial"));
        assert!(!shown.contains("syntax error"));
    }

    #[tokio::test]
    async fn unusable_database_path_reports_generic_message() {
        // The parent of the database file is a regular file, so it cannot be created.
        let mut config = LotesConfig::default();
        config.database.path = format!("{}/Cargo.toml/lotes.db", env!("CARGO_MANIFEST_DIR"));

        let Err(err) = AppContext::init(config, None).await else {
            panic!("opening a database under a file should fail");
        };
        let shown = format!("{err:#}");
        assert!(shown.contains(PERSISTENCE_FAILURE_MESSAGE));
        assert!(!shown.contains("Cargo.toml"), "path leaked: {shown}");
    }
}
