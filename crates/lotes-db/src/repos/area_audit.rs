//! Area-change audit queries. Rows are written only by the ledger.

use lotes_core::entities::AreaChangeAudit;
use lotes_core::responses::AreaChangeView;

use crate::error::DatabaseError;
use crate::helpers::{get_area, get_opt_string, parse_datetime};
use crate::service::LotesService;

fn row_to_view(row: &libsql::Row) -> Result<AreaChangeView, DatabaseError> {
    Ok(AreaChangeView {
        audit: AreaChangeAudit {
            id: row.get::<String>(0)?,
            parcel_id: row.get::<String>(1)?,
            area_before: get_area(row, 2)?,
            area_after: get_area(row, 3)?,
            reason: get_opt_string(row, 4)?,
            changed_by: row.get::<String>(5)?,
            changed_at: parse_datetime(&row.get::<String>(6)?)?,
        },
        changed_by_name: get_opt_string(row, 7)?,
    })
}

impl LotesService {
    /// Area history of a parcel, newest first, with the actor's name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn area_history(&self, parcel_id: &str) -> Result<Vec<AreaChangeView>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT a.id, a.parcel_id, a.area_before, a.area_after, a.reason, a.changed_by, a.changed_at, u.name
                 FROM area_change_audits a
                 LEFT JOIN users u ON u.id = a.changed_by
                 WHERE a.parcel_id = ?1
                 ORDER BY a.changed_at DESC, a.rowid DESC",
                [parcel_id],
            )
            .await?;
        let mut views = Vec::new();
        while let Some(row) = rows.next().await? {
            views.push(row_to_view(&row)?);
        }
        Ok(views)
    }
}
