//! Service layer over `LotesDb`.
//!
//! `LotesService` owns the database handle and the settings that shape its
//! behaviour (image cap, privacy policy version, anonymization placeholder).
//! Repository methods are implemented as `impl LotesService` blocks under
//! [`crate::repos`]. Every method that acts on behalf of a user takes the
//! caller's [`lotes_core::identity::SessionContext`] explicitly.

use chrono::{NaiveDate, Utc};
use lotes_config::{GeneralConfig, LotesConfig, PrivacyConfig};

use crate::LotesDb;
use crate::error::DatabaseError;

pub struct LotesService {
    db: LotesDb,
    general: GeneralConfig,
    privacy: PrivacyConfig,
}

impl LotesService {
    /// Open the database described by `config` (remote when a URL and token
    /// are set, otherwise the local file).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn from_config(config: &LotesConfig) -> Result<Self, DatabaseError> {
        let db = if config.database.is_remote() {
            LotesDb::open_remote(&config.database.url, &config.database.auth_token).await?
        } else {
            LotesDb::open_local(&config.database.path).await?
        };
        Ok(Self::from_db(db, config))
    }

    /// Create a service over a local database with default settings.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = LotesDb::open_local(db_path).await?;
        Ok(Self::from_db(db, &LotesConfig::default()))
    }

    #[must_use]
    pub fn from_db(db: LotesDb, config: &LotesConfig) -> Self {
        Self {
            db,
            general: config.general.clone(),
            privacy: config.privacy.clone(),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &LotesDb {
        &self.db
    }

    #[must_use]
    pub const fn general(&self) -> &GeneralConfig {
        &self.general
    }

    #[must_use]
    pub const fn privacy(&self) -> &PrivacyConfig {
        &self.privacy
    }

    /// Today's date, used as the upper bound for approval dates.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Run `f` inside a transaction. Commits on `Ok`, rolls back on `Err`.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns, or a libSQL error from begin/commit.
    pub(crate) async fn in_transaction<T, F>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: AsyncFnOnce(&libsql::Transaction) -> Result<T, DatabaseError>,
    {
        let tx = self.db.conn().transaction().await?;
        match f(&tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
