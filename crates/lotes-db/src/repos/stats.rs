//! Dashboard counters.

use lotes_core::identity::SessionContext;
use lotes_core::responses::DashboardStats;

use crate::error::DatabaseError;
use crate::helpers::read_count;
use crate::service::LotesService;

impl LotesService {
    /// Parcel and construction counts; the access-log count is admin-only.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn dashboard_stats(&self, ctx: &SessionContext) -> Result<DashboardStats, DatabaseError> {
        let total_parcels = self.count_table("parcels").await?;
        let total_constructions = self.count_table("construction_records").await?;
        let total_access_logs = if ctx.is_admin() {
            Some(self.count_table("access_logs").await?)
        } else {
            None
        };
        Ok(DashboardStats {
            total_parcels,
            total_constructions,
            total_access_logs,
        })
    }

    async fn count_table(&self, table: &'static str) -> Result<u64, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await?;
        read_count(rows).await
    }
}
