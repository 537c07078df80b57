//! Access logging and anonymization.
//!
//! A view is logged only when the viewer has consented to access logging.
//! Rows are never deleted; anonymization overwrites the CPF with the
//! configured placeholder and keeps the row for audit.

use chrono::Utc;
use lotes_core::entities::AccessLog;
use lotes_core::identity::SessionContext;
use lotes_core::ids::PREFIX_ACCESS_LOG;
use lotes_core::responses::{AccessLogView, ParcelSummary};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, read_count};
use crate::service::LotesService;

fn row_to_view(row: &libsql::Row) -> Result<AccessLogView, DatabaseError> {
    let log = AccessLog {
        id: row.get::<String>(0)?,
        parcel_id: row.get::<String>(1)?,
        user_cpf: row.get::<String>(2)?,
        accessed_at: parse_datetime(&row.get::<String>(3)?)?,
    };
    let parcel = match get_opt_string(row, 4)? {
        Some(iptu_number) => Some(ParcelSummary {
            iptu_number,
            lot_number: row.get::<String>(5)?,
            subdivision: row.get::<String>(6)?,
        }),
        None => None,
    };
    Ok(AccessLogView { log, parcel })
}

impl LotesService {
    /// Log that the caller viewed `parcel_id`. Returns `None` without writing
    /// when the caller has not consented to access logging.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails (e.g., unknown parcel).
    pub async fn record_access(
        &self,
        ctx: &SessionContext,
        parcel_id: &str,
    ) -> Result<Option<AccessLog>, DatabaseError> {
        if !ctx.access_log_consent {
            tracing::debug!(user_id = %ctx.user_id, parcel_id, "access not logged: no consent");
            return Ok(None);
        }
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ACCESS_LOG).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO access_logs (id, parcel_id, user_cpf, accessed_at) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), parcel_id, ctx.cpf.as_str(), now.to_rfc3339()],
            )
            .await?;
        Ok(Some(AccessLog {
            id,
            parcel_id: parcel_id.to_string(),
            user_cpf: ctx.cpf.clone(),
            accessed_at: now,
        }))
    }

    /// Most recent access logs with parcel identifiers. Admin only.
    ///
    /// `limit` defaults to `privacy.access_log_limit`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for non-admins, or a query failure.
    pub async fn list_access_logs(
        &self,
        ctx: &SessionContext,
        limit: Option<u32>,
    ) -> Result<Vec<AccessLogView>, DatabaseError> {
        if let Err(e) = ctx.require_admin("list access logs") {
            tracing::warn!(user_id = %ctx.user_id, "denied access log listing");
            return Err(e.into());
        }
        let limit = limit.unwrap_or(self.privacy().access_log_limit);
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT l.id, l.parcel_id, l.user_cpf, l.accessed_at, p.iptu_number, p.lot_number, p.subdivision
                 FROM access_logs l
                 LEFT JOIN parcels p ON p.id = l.parcel_id
                 ORDER BY l.accessed_at DESC, l.rowid DESC
                 LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next().await? {
            logs.push(row_to_view(&row)?);
        }
        Ok(logs)
    }

    /// Number of access-log rows still carrying the caller's CPF.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_my_access_logs(&self, ctx: &SessionContext) -> Result<u64, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM access_logs WHERE user_cpf = ?1",
                [ctx.cpf.as_str()],
            )
            .await?;
        read_count(rows).await
    }

    /// Replace the caller's CPF with the placeholder in every access-log row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn anonymize_my_access_logs(&self, ctx: &SessionContext) -> Result<u64, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE access_logs SET user_cpf = ?1 WHERE user_cpf = ?2",
                libsql::params![
                    self.privacy().anonymized_placeholder.as_str(),
                    ctx.cpf.as_str()
                ],
            )
            .await?;
        tracing::info!(user_id = %ctx.user_id, rows = changed, "anonymized access logs");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use lotes_config::LotesConfig;
    use lotes_core::cpf::ANONYMIZED_CPF;
    use lotes_core::errors::ErrorKind;
    use pretty_assertions::assert_eq;

    use crate::LotesDb;
    use crate::service::LotesService;

    use crate::test_support::helpers::{
        admin_and_user, count_rows, parcel_with_area, test_service,
    };

    #[tokio::test]
    async fn consent_gates_logging() {
        let svc = test_service().await;
        let (admin, mut user) = admin_and_user(&svc).await;
        let parcel = parcel_with_area(&svc, &admin, 100).await;

        user.access_log_consent = false;
        assert!(svc.record_access(&user, &parcel.id).await.unwrap().is_none());
        assert_eq!(count_rows(&svc, "access_logs").await, 0);

        user.access_log_consent = true;
        let log = svc.record_access(&user, &parcel.id).await.unwrap().unwrap();
        assert_eq!(log.user_cpf, user.cpf);
        assert_eq!(count_rows(&svc, "access_logs").await, 1);
    }

    #[tokio::test]
    async fn details_record_access_for_consenting_viewer() {
        let svc = test_service().await;
        let (admin, user) = admin_and_user(&svc).await;
        let parcel = parcel_with_area(&svc, &admin, 100).await;

        let details = svc.parcel_details(&user, &parcel.id).await.unwrap();
        assert_eq!(details.parcel.id, parcel.id);
        assert!(details.access_recorded.is_some());
        assert_eq!(svc.count_my_access_logs(&user).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn listing_is_admin_only_and_joins_parcel() {
        let svc = test_service().await;
        let (admin, user) = admin_and_user(&svc).await;
        let parcel = parcel_with_area(&svc, &admin, 100).await;
        svc.record_access(&user, &parcel.id).await.unwrap();

        let err = svc.list_access_logs(&user, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let logs = svc.list_access_logs(&admin, None).await.unwrap();
        assert_eq!(logs.len(), 1);
        let summary = logs[0].parcel.as_ref().unwrap();
        assert_eq!(summary.iptu_number, parcel.iptu_number);
        assert_eq!(summary.lot_number, parcel.lot_number);
    }

    #[tokio::test]
    async fn anonymize_masks_only_my_rows() {
        let svc = test_service().await;
        let (mut admin, user) = admin_and_user(&svc).await;
        let parcel = parcel_with_area(&svc, &admin, 100).await;
        admin.access_log_consent = true;

        svc.record_access(&user, &parcel.id).await.unwrap();
        svc.record_access(&user, &parcel.id).await.unwrap();
        svc.record_access(&admin, &parcel.id).await.unwrap();

        assert_eq!(svc.anonymize_my_access_logs(&user).await.unwrap(), 2);
        assert_eq!(svc.count_my_access_logs(&user).await.unwrap(), 0);
        assert_eq!(svc.count_my_access_logs(&admin).await.unwrap(), 1);
        assert_eq!(count_rows(&svc, "access_logs").await, 3);

        let logs = svc.list_access_logs(&admin, Some(10)).await.unwrap();
        let masked = logs
            .iter()
            .filter(|l| l.log.is_anonymized(ANONYMIZED_CPF))
            .count();
        assert_eq!(masked, 2);
        assert!(logs.iter().any(|l| l.log.user_cpf != ANONYMIZED_CPF));

        assert_eq!(svc.anonymize_my_access_logs(&user).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn anonymize_uses_configured_placeholder() {
        let mut config = LotesConfig::default();
        config.privacy.anonymized_placeholder = "[removed]".to_string();
        let svc = LotesService::from_db(LotesDb::open_local(":memory:").await.unwrap(), &config);
        let (admin, user) = admin_and_user(&svc).await;
        let parcel = parcel_with_area(&svc, &admin, 100).await;
        svc.record_access(&user, &parcel.id).await.unwrap();

        assert_eq!(svc.anonymize_my_access_logs(&user).await.unwrap(), 1);

        let logs = svc.list_access_logs(&admin, None).await.unwrap();
        assert_eq!(logs[0].log.user_cpf, "[removed]");
        assert!(logs[0].log.is_anonymized(&svc.privacy().anonymized_placeholder));
        assert!(!logs[0].log.is_anonymized(ANONYMIZED_CPF));
    }

    #[tokio::test]
    async fn export_counts_logs() {
        let svc = test_service().await;
        let (admin, user) = admin_and_user(&svc).await;
        let parcel = parcel_with_area(&svc, &admin, 100).await;
        svc.record_access(&user, &parcel.id).await.unwrap();

        let export = svc.export_personal_data(&user).await.unwrap();
        assert_eq!(export.personal_data.cpf, user.cpf);
        assert_eq!(export.access_logs.total_records, 1);
        assert!(export.consents.privacy_policy);
    }
}
