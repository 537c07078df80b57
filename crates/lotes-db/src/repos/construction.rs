//! Construction record queries. Records are written only by the ledger.

use lotes_core::entities::ConstructionRecord;

use crate::error::DatabaseError;
use crate::helpers::{get_area, parse_date, parse_datetime};
use crate::service::LotesService;

fn row_to_construction(row: &libsql::Row) -> Result<ConstructionRecord, DatabaseError> {
    Ok(ConstructionRecord {
        id: row.get::<String>(0)?,
        parcel_id: row.get::<String>(1)?,
        built_area: get_area(row, 2)?,
        demolished_area: get_area(row, 3)?,
        approved_on: parse_date(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl LotesService {
    /// Construction history of a parcel, newest approval first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_constructions(
        &self,
        parcel_id: &str,
    ) -> Result<Vec<ConstructionRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, parcel_id, built_area, demolished_area, approved_on, created_at
                 FROM construction_records WHERE parcel_id = ?1
                 ORDER BY approved_on DESC, created_at DESC",
                [parcel_id],
            )
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_construction(&row)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lotes_core::area::Area;
    use lotes_core::ledger::AreaChange;

    use crate::test_support::helpers::{admin_and_user, new_parcel, test_service};

    #[tokio::test]
    async fn newest_approval_first() {
        let svc = test_service().await;
        let (admin, _) = admin_and_user(&svc).await;
        let older = NaiveDate::from_ymd_opt(2019, 4, 1).unwrap();
        let newer = NaiveDate::from_ymd_opt(2022, 8, 30).unwrap();
        let history = [
            AreaChange::new(Area::from_whole_m2(10), Area::ZERO, newer),
            AreaChange::new(Area::from_whole_m2(20), Area::ZERO, older),
        ];
        let outcome = svc
            .create_parcel(&admin, new_parcel(100), &history)
            .await
            .unwrap();

        let records = svc.list_constructions(&outcome.parcel.id).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].approved_on, newer);
        assert_eq!(records[1].approved_on, older);
        assert_eq!(records[1].built_area, Area::from_whole_m2(20));
    }
}
