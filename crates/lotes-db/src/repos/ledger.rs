//! Transactional application of area ledger plans.
//!
//! Every operation here follows the same protocol inside one transaction:
//! 1. Read the parcel's `total_area` and `version`
//! 2. Reject a stale `expected_version` with `Conflict`
//! 3. Plan the change with [`lotes_core::ledger`] (validation only, no writes)
//! 4. Insert construction records and area-change audits
//! 5. `UPDATE parcels ... WHERE id = ? AND version = ?`; zero rows is a `Conflict`
//! 6. Commit
//!
//! Any error rolls the whole transaction back, so a batch is all-or-nothing.

use chrono::Utc;
use lotes_core::area::Area;
use lotes_core::entities::{AreaChangeAudit, ConstructionRecord};
use lotes_core::enums::EntityType;
use lotes_core::errors::{CoreError, ValidationError};
use lotes_core::identity::SessionContext;
use lotes_core::ids::{PREFIX_AREA_AUDIT, PREFIX_CONSTRUCTION};
use lotes_core::ledger::{
    AreaChange, DirectEdit, LedgerStep, plan_batch, plan_change, plan_direct_edit,
};
use lotes_core::responses::{DirectEditOutcome, LedgerOutcome, LedgerPreview};

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::get_area;
use crate::repos::parcel::fetch_parcel;
use crate::service::LotesService;

fn conflict(parcel_id: &str) -> DatabaseError {
    CoreError::conflict(EntityType::Parcel, parcel_id).into()
}

/// Read `(total_area, version)` for a parcel.
async fn read_area(
    conn: &libsql::Connection,
    parcel_id: &str,
) -> Result<(Area, i64), DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT total_area, version FROM parcels WHERE id = ?1",
            [parcel_id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| CoreError::not_found(EntityType::Parcel, parcel_id))?;
    Ok((get_area(&row, 0)?, row.get::<i64>(1)?))
}

/// Read the current area and enforce `expected_version` when given.
async fn read_checked(
    conn: &libsql::Connection,
    parcel_id: &str,
    expected_version: Option<i64>,
) -> Result<(Area, i64), DatabaseError> {
    let (area, version) = read_area(conn, parcel_id).await?;
    if let Some(expected) = expected_version {
        if expected != version {
            tracing::warn!(parcel_id, expected, actual = version, "stale parcel version");
            return Err(conflict(parcel_id));
        }
    }
    Ok((area, version))
}

impl LotesService {
    /// Apply one construction/demolition event.
    ///
    /// `expected_version` is the version of the parcel the caller displayed;
    /// without it, the version read at the start of the transaction is used.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, any `ValidationError` from planning,
    /// `Conflict` when the parcel changed concurrently, or a persistence error.
    pub async fn apply_change(
        &self,
        ctx: &SessionContext,
        parcel_id: &str,
        change: &AreaChange,
        expected_version: Option<i64>,
    ) -> Result<LedgerOutcome, DatabaseError> {
        ctx.require_admin("apply area change")?;
        let today = self.today();
        self.apply_planned(ctx, parcel_id, expected_version, |current| {
            plan_change(current, change, today).map(|step| vec![step])
        })
        .await
    }

    /// Apply an ordered batch as a left fold. All-or-nothing.
    ///
    /// # Errors
    ///
    /// Same as [`Self::apply_change`]; planning failures arrive as
    /// `ValidationError::BatchEntry` naming the failing index. An empty batch
    /// is rejected.
    pub async fn apply_changes(
        &self,
        ctx: &SessionContext,
        parcel_id: &str,
        changes: &[AreaChange],
        expected_version: Option<i64>,
    ) -> Result<LedgerOutcome, DatabaseError> {
        ctx.require_admin("apply area change")?;
        if changes.is_empty() {
            return Err(ValidationError::MissingField("area change entries").into());
        }
        let today = self.today();
        self.apply_planned(ctx, parcel_id, expected_version, |current| {
            plan_batch(current, changes, today)
        })
        .await
    }

    /// Plan a batch against the stored area without writing anything.
    ///
    /// # Errors
    ///
    /// `NotFound` or the planning failure the real application would hit.
    pub async fn preview_changes(
        &self,
        ctx: &SessionContext,
        parcel_id: &str,
        changes: &[AreaChange],
    ) -> Result<LedgerPreview, DatabaseError> {
        ctx.require_admin("apply area change")?;
        let (current, _) = read_area(self.db().conn(), parcel_id).await?;
        let steps = plan_batch(current, changes, self.today())?;
        Ok(LedgerPreview {
            parcel_id: parcel_id.to_string(),
            steps,
        })
    }

    /// Manually set a parcel's area, recording an audit row without a
    /// construction record.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, `NonPositiveArea`, `UnchangedArea`,
    /// `Conflict`, or a persistence error.
    pub async fn apply_direct_edit(
        &self,
        ctx: &SessionContext,
        parcel_id: &str,
        new_area: Area,
        reason: Option<&str>,
        expected_version: Option<i64>,
    ) -> Result<DirectEditOutcome, DatabaseError> {
        ctx.require_admin("edit parcel area")?;

        let outcome = self
            .in_transaction(async |tx| {
                let (current, version) = read_checked(tx, parcel_id, expected_version).await?;
                let edit: DirectEdit = plan_direct_edit(current, new_area, reason)?;
                let audit = self
                    .insert_audit(
                        tx,
                        parcel_id,
                        edit.area_before,
                        edit.area_after,
                        edit.reason.as_deref(),
                        &ctx.user_id,
                    )
                    .await?;
                self.bump_area(tx, parcel_id, edit.area_after, version).await?;
                let parcel = fetch_parcel(tx, parcel_id).await?;
                Ok(DirectEditOutcome { parcel, audit })
            })
            .await?;

        tracing::debug!(
            parcel_id,
            before = %outcome.audit.area_before,
            after = %outcome.audit.area_after,
            "applied direct area edit"
        );
        Ok(outcome)
    }

    async fn apply_planned<P>(
        &self,
        ctx: &SessionContext,
        parcel_id: &str,
        expected_version: Option<i64>,
        plan: P,
    ) -> Result<LedgerOutcome, DatabaseError>
    where
        P: FnOnce(Area) -> Result<Vec<LedgerStep>, ValidationError>,
    {
        let outcome = self
            .in_transaction(async |tx| {
                let (current, version) = read_checked(tx, parcel_id, expected_version).await?;
                let steps = plan(current)?;
                let (records, audits) = self.write_steps(tx, parcel_id, &steps, &ctx.user_id).await?;
                let final_area = steps.last().map_or(current, |s| s.area_after);
                self.bump_area(tx, parcel_id, final_area, version).await?;
                let parcel = fetch_parcel(tx, parcel_id).await?;
                Ok(LedgerOutcome {
                    parcel,
                    records,
                    audits,
                })
            })
            .await?;

        tracing::debug!(
            parcel_id,
            entries = outcome.records.len(),
            delta = %outcome.net_delta(),
            area = %outcome.parcel.total_area,
            "applied area change"
        );
        Ok(outcome)
    }

    /// Insert a construction record and its audit row for each planned step.
    pub(crate) async fn write_steps(
        &self,
        conn: &libsql::Connection,
        parcel_id: &str,
        steps: &[LedgerStep],
        actor_id: &str,
    ) -> Result<(Vec<ConstructionRecord>, Vec<AreaChangeAudit>), DatabaseError> {
        let mut records = Vec::with_capacity(steps.len());
        let mut audits = Vec::with_capacity(steps.len());
        for step in steps {
            records.push(self.insert_construction(conn, parcel_id, &step.change).await?);
            audits.push(
                self.insert_audit(
                    conn,
                    parcel_id,
                    step.area_before,
                    step.area_after,
                    Some(step.motive.as_str()),
                    actor_id,
                )
                .await?,
            );
        }
        Ok((records, audits))
    }

    async fn insert_construction(
        &self,
        conn: &libsql::Connection,
        parcel_id: &str,
        change: &AreaChange,
    ) -> Result<ConstructionRecord, DatabaseError> {
        let now = Utc::now();
        let id = generate_id_on(conn, PREFIX_CONSTRUCTION).await?;
        conn.execute(
            "INSERT INTO construction_records (id, parcel_id, built_area, demolished_area, approved_on, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            libsql::params![
                id.as_str(),
                parcel_id,
                change.built.centiares(),
                change.demolished.centiares(),
                change.approved_on.format("%Y-%m-%d").to_string(),
                now.to_rfc3339()
            ],
        )
        .await?;
        Ok(ConstructionRecord {
            id,
            parcel_id: parcel_id.to_string(),
            built_area: change.built,
            demolished_area: change.demolished,
            approved_on: change.approved_on,
            created_at: now,
        })
    }

    async fn insert_audit(
        &self,
        conn: &libsql::Connection,
        parcel_id: &str,
        area_before: Area,
        area_after: Area,
        reason: Option<&str>,
        actor_id: &str,
    ) -> Result<AreaChangeAudit, DatabaseError> {
        let now = Utc::now();
        let id = generate_id_on(conn, PREFIX_AREA_AUDIT).await?;
        conn.execute(
            "INSERT INTO area_change_audits (id, parcel_id, area_before, area_after, reason, changed_by, changed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            libsql::params![
                id.as_str(),
                parcel_id,
                area_before.centiares(),
                area_after.centiares(),
                reason,
                actor_id,
                now.to_rfc3339()
            ],
        )
        .await?;
        Ok(AreaChangeAudit {
            id,
            parcel_id: parcel_id.to_string(),
            area_before,
            area_after,
            reason: reason.map(String::from),
            changed_by: actor_id.to_string(),
            changed_at: now,
        })
    }

    /// Set the area and bump `version`, but only if `version` is still `expected`.
    pub(crate) async fn bump_area(
        &self,
        conn: &libsql::Connection,
        parcel_id: &str,
        new_area: Area,
        expected: i64,
    ) -> Result<(), DatabaseError> {
        let changed = conn
            .execute(
                "UPDATE parcels SET total_area = ?1, version = version + 1, updated_at = ?2
                 WHERE id = ?3 AND version = ?4",
                libsql::params![
                    new_area.centiares(),
                    Utc::now().to_rfc3339(),
                    parcel_id,
                    expected
                ],
            )
            .await?;
        if changed == 0 {
            tracing::warn!(parcel_id, expected, "parcel changed during ledger write");
            return Err(conflict(parcel_id));
        }
        Ok(())
    }
}
