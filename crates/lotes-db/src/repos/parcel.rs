//! Parcel repository: registration, descriptive updates, listing and search.
//!
//! Area changes never go through here; see [`crate::repos::ledger`].

use chrono::Utc;
use lotes_core::area::Area;
use lotes_core::entities::{Parcel, format_iptu, sanitize_search_term};
use lotes_core::enums::EntityType;
use lotes_core::errors::{CoreError, ValidationError};
use lotes_core::identity::SessionContext;
use lotes_core::ids::PREFIX_PARCEL;
use lotes_core::ledger::{AreaChange, plan_batch};
use lotes_core::responses::{LedgerOutcome, ParcelDetails};

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::{encode_string_list, get_area, parse_datetime, parse_string_list};
use crate::service::LotesService;
use crate::updates::parcel::ParcelUpdate;

pub(crate) const PARCEL_COLUMNS: &str = "id, iptu_number, cadastral_number, subdivision, block, lot_number, \
     total_area, images, created_by, version, created_at, updated_at";

pub(crate) fn row_to_parcel(row: &libsql::Row) -> Result<Parcel, DatabaseError> {
    Ok(Parcel {
        id: row.get::<String>(0)?,
        iptu_number: row.get::<String>(1)?,
        cadastral_number: row.get::<String>(2)?,
        subdivision: row.get::<String>(3)?,
        block: row.get::<String>(4)?,
        lot_number: row.get::<String>(5)?,
        total_area: get_area(row, 6)?,
        images: parse_string_list(&row.get::<String>(7)?)?,
        created_by: row.get::<String>(8)?,
        version: row.get::<i64>(9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

/// Fetch a parcel on any connection, including one inside a transaction.
pub(crate) async fn fetch_parcel(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Parcel, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {PARCEL_COLUMNS} FROM parcels WHERE id = ?1"),
            [id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| CoreError::not_found(EntityType::Parcel, id))?;
    row_to_parcel(&row)
}

/// Input for [`LotesService::create_parcel`].
#[derive(Debug, Clone, Default)]
pub struct NewParcel {
    pub iptu_number: String,
    pub cadastral_number: String,
    pub subdivision: String,
    pub block: String,
    pub lot_number: String,
    /// Area before any construction history is applied.
    pub total_area: Area,
    pub images: Vec<String>,
}

impl NewParcel {
    /// Trim fields, normalize the IPTU mask, and check required values.
    ///
    /// # Errors
    ///
    /// `MissingField` for a blank identifier, `NegativeParcelArea`, or
    /// `TooManyImages` when more than `max_images` URLs are given.
    pub fn normalized(mut self, max_images: usize) -> Result<Self, ValidationError> {
        self.iptu_number = format_iptu(&self.iptu_number);
        for (name, value) in [
            ("cadastral_number", &mut self.cadastral_number),
            ("subdivision", &mut self.subdivision),
            ("block", &mut self.block),
            ("lot_number", &mut self.lot_number),
        ] {
            *value = value.trim().to_string();
            if value.is_empty() {
                return Err(ValidationError::MissingField(name));
            }
        }
        if self.iptu_number.is_empty() {
            return Err(ValidationError::MissingField("iptu_number"));
        }
        if self.total_area.is_negative() {
            return Err(ValidationError::NegativeParcelArea(self.total_area));
        }
        check_images(&self.images, max_images)?;
        Ok(self)
    }
}

pub(crate) fn check_images(images: &[String], max: usize) -> Result<(), ValidationError> {
    if images.len() > max {
        return Err(ValidationError::TooManyImages {
            max,
            got: images.len(),
        });
    }
    if images.iter().any(|url| url.trim().is_empty()) {
        return Err(ValidationError::MissingField("image url"));
    }
    Ok(())
}

/// Substring filters for [`LotesService::search_parcels`]. Set fields are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct ParcelFilter {
    pub iptu_number: Option<String>,
    pub cadastral_number: Option<String>,
    pub subdivision: Option<String>,
    pub block: Option<String>,
    pub lot_number: Option<String>,
    pub limit: Option<u32>,
}

impl ParcelFilter {
    /// Sanitized `(column, pattern)` pairs, skipping fields that end up empty.
    fn conditions(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(iptu) = self.iptu_number.as_deref().map(format_iptu) {
            if !iptu.is_empty() {
                out.push(("iptu_number", iptu));
            }
        }
        for (column, value) in [
            ("cadastral_number", &self.cadastral_number),
            ("subdivision", &self.subdivision),
            ("block", &self.block),
            ("lot_number", &self.lot_number),
        ] {
            if let Some(term) = value.as_deref().map(sanitize_search_term) {
                let term = term.trim();
                if !term.is_empty() {
                    out.push((column, term.to_string()));
                }
            }
        }
        out
    }
}

impl LotesService {
    /// Register a parcel and apply its construction history in one transaction.
    ///
    /// The history is planned up front from `new.total_area`; if any entry is
    /// invalid nothing is written.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for non-admins, any validation failure from the parcel
    /// fields or the history batch, or a persistence error.
    pub async fn create_parcel(
        &self,
        ctx: &SessionContext,
        new: NewParcel,
        history: &[AreaChange],
    ) -> Result<LedgerOutcome, DatabaseError> {
        ctx.require_admin("create parcel")?;
        let new = new.normalized(self.general().max_images_per_parcel)?;
        let steps = plan_batch(new.total_area, history, self.today())?;

        let outcome = self
            .in_transaction(async |tx| {
                let now = Utc::now().to_rfc3339();
                let id = generate_id_on(tx, PREFIX_PARCEL).await?;
                let images = encode_string_list(&new.images)?;
                tx.execute(
                    "INSERT INTO parcels (id, iptu_number, cadastral_number, subdivision, block, lot_number,
                                          total_area, images, created_by, version, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?10)",
                    libsql::params![
                        id.as_str(),
                        new.iptu_number.as_str(),
                        new.cadastral_number.as_str(),
                        new.subdivision.as_str(),
                        new.block.as_str(),
                        new.lot_number.as_str(),
                        new.total_area.centiares(),
                        images,
                        ctx.user_id.as_str(),
                        now
                    ],
                )
                .await?;

                let (records, audits) = self.write_steps(tx, &id, &steps, &ctx.user_id).await?;
                if let Some(last) = steps.last() {
                    self.bump_area(tx, &id, last.area_after, 0).await?;
                }
                let parcel = fetch_parcel(tx, &id).await?;
                Ok(LedgerOutcome {
                    parcel,
                    records,
                    audits,
                })
            })
            .await?;

        tracing::debug!(
            parcel_id = %outcome.parcel.id,
            history = outcome.records.len(),
            "created parcel"
        );
        Ok(outcome)
    }

    /// Change descriptive fields and images. Never touches `total_area` or `version`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for non-admins, `NotFound`, or a validation failure.
    pub async fn update_parcel(
        &self,
        ctx: &SessionContext,
        parcel_id: &str,
        update: ParcelUpdate,
    ) -> Result<Parcel, DatabaseError> {
        ctx.require_admin("update parcel")?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(iptu) = update.iptu_number.as_deref() {
            let iptu = format_iptu(iptu);
            if iptu.is_empty() {
                return Err(ValidationError::MissingField("iptu_number").into());
            }
            params.push(iptu.into());
            sets.push(format!("iptu_number = ?{}", params.len()));
        }
        for (column, value) in [
            ("cadastral_number", &update.cadastral_number),
            ("subdivision", &update.subdivision),
            ("block", &update.block),
            ("lot_number", &update.lot_number),
        ] {
            if let Some(value) = value.as_deref() {
                let value = value.trim();
                if value.is_empty() {
                    return Err(ValidationError::MissingField(column).into());
                }
                params.push(value.into());
                sets.push(format!("{column} = ?{}", params.len()));
            }
        }
        if let Some(images) = update.images.as_deref() {
            check_images(images, self.general().max_images_per_parcel)?;
            params.push(encode_string_list(images)?.into());
            sets.push(format!("images = ?{}", params.len()));
        }

        if sets.is_empty() {
            return self.get_parcel(parcel_id).await;
        }

        params.push(Utc::now().to_rfc3339().into());
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(parcel_id.into());
        let sql = format!(
            "UPDATE parcels SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );

        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(CoreError::not_found(EntityType::Parcel, parcel_id).into());
        }
        tracing::debug!(parcel_id, "updated parcel fields");
        self.get_parcel(parcel_id).await
    }

    /// # Errors
    ///
    /// `NotFound` when no parcel has this id.
    pub async fn get_parcel(&self, id: &str) -> Result<Parcel, DatabaseError> {
        fetch_parcel(self.db().conn(), id).await
    }

    /// Newest parcels first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_parcels(&self, limit: u32) -> Result<Vec<Parcel>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {PARCEL_COLUMNS} FROM parcels ORDER BY created_at DESC, id LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;
        let mut parcels = Vec::new();
        while let Some(row) = rows.next().await? {
            parcels.push(row_to_parcel(&row)?);
        }
        Ok(parcels)
    }

    /// Case-insensitive substring search. An empty filter lists everything.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn search_parcels(&self, filter: &ParcelFilter) -> Result<Vec<Parcel>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        for (column, term) in filter.conditions() {
            params.push(format!("%{term}%").into());
            conditions.push(format!("{column} LIKE ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit = filter.limit.unwrap_or(self.general().default_limit);
        let sql = format!(
            "SELECT {PARCEL_COLUMNS} FROM parcels {where_clause} ORDER BY created_at DESC, id LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut parcels = Vec::new();
        while let Some(row) = rows.next().await? {
            parcels.push(row_to_parcel(&row)?);
        }
        Ok(parcels)
    }

    /// Everything the details screen shows, recording an access for the viewer.
    ///
    /// # Errors
    ///
    /// `NotFound` when no parcel has this id.
    pub async fn parcel_details(
        &self,
        ctx: &SessionContext,
        parcel_id: &str,
    ) -> Result<ParcelDetails, DatabaseError> {
        let parcel = self.get_parcel(parcel_id).await?;
        let constructions = self.list_constructions(parcel_id).await?;
        let area_history = self.area_history(parcel_id).await?;
        let access_recorded = self.record_access(ctx, parcel_id).await?;
        Ok(ParcelDetails {
            parcel,
            constructions,
            area_history,
            access_recorded,
        })
    }
}
