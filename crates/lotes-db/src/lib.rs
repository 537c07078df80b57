//! # lotes-db
//!
//! libSQL persistence for the parcel registry.
//!
//! Holds parcels, construction records, area-change audits, access logs and
//! user profiles. Every area ledger operation runs inside a single libSQL
//! transaction guarded by the parcel's `version` column, so a failed or
//! concurrent write leaves no partial history behind.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) for both local files
//! and remote libSQL servers.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod test_support;
pub mod updates;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and its single connection.
pub struct LotesDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl LotesDb {
    /// Open a local database at the given path. `":memory:"` is accepted.
    ///
    /// Creates the parent directory if needed and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:" {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DatabaseError::Migration(format!("create {}: {e}", parent.display()))
                    })?;
                }
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let lotes_db = Self {
            db,
            conn,
            remote: false,
        };
        lotes_db.run_migrations().await?;
        tracing::debug!(path, "opened local database");
        Ok(lotes_db)
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection or migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;
        let lotes_db = Self {
            db,
            conn,
            remote: true,
        };
        lotes_db.run_migrations().await?;
        tracing::debug!(url, "opened remote database");
        Ok(lotes_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"lot-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        generate_id_on(&self.conn, prefix).await
    }
}

/// Generate a prefixed ID on any connection, including one inside a transaction.
///
/// Uses `randomblob(4)` in SQL to produce 8 hex chars, then prepends the prefix.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or returns no rows.
pub async fn generate_id_on(
    conn: &libsql::Connection,
    prefix: &str,
) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> LotesDb {
        LotesDb::open_local(":memory:").await.unwrap()
    }

    async fn table_exists(db: &LotesDb, kind: &str, name: &str) -> bool {
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type = ?1 AND name = ?2",
                [kind, name],
            )
            .await
            .unwrap();
        rows.next().await.unwrap().is_some()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        for table in [
            "users",
            "parcels",
            "construction_records",
            "area_change_audits",
            "access_logs",
        ] {
            assert!(table_exists(&db, "table", table).await, "table '{table}' should exist");
        }
        assert!(table_exists(&db, "trigger", "area_change_audits_no_update").await);
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("lot").await.unwrap();
        assert!(
            lotes_core::ids::has_prefix(&id, lotes_core::ids::PREFIX_PARCEL),
            "unexpected id shape: {id}"
        );
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in lotes_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(lotes_core::ids::has_prefix(&id, prefix), "{id}");
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("acc").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn open_local_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lotes.db");
        let db = LotesDb::open_local(path.to_str().unwrap()).await.unwrap();
        assert!(!db.is_remote());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn history_tables_reject_updates() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO users (id, cpf, name) VALUES ('usr-00000001', '52998224725', 'Ana');
                 INSERT INTO parcels (id, iptu_number, cadastral_number, subdivision, block, lot_number, created_by)
                     VALUES ('lot-00000001', 'I', 'C', 'S', 'B', 'L', 'usr-00000001');
                 INSERT INTO area_change_audits (id, parcel_id, area_before, area_after, changed_by)
                     VALUES ('alt-00000001', 'lot-00000001', 0, 100, 'usr-00000001');",
            )
            .await
            .unwrap();

        let update = db
            .conn()
            .execute("UPDATE area_change_audits SET area_after = 5", ())
            .await;
        assert!(update.is_err());
        let delete = db.conn().execute("DELETE FROM parcels", ()).await;
        assert!(delete.is_err());
    }

    #[tokio::test]
    async fn negative_total_area_is_rejected_by_schema() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO users (id, cpf, name) VALUES ('usr-00000001', '52998224725', 'Ana')",
                (),
            )
            .await
            .unwrap();
        let result = db
            .conn()
            .execute(
                "INSERT INTO parcels (id, iptu_number, cadastral_number, subdivision, block, lot_number, total_area, created_by)
                 VALUES ('lot-00000001', 'I', 'C', 'S', 'B', 'L', -1, 'usr-00000001')",
                (),
            )
            .await;
        assert!(result.is_err());
    }
}
