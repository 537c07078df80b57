//! User profiles, sessions, consent and personal-data export.

use chrono::Utc;
use lotes_core::cpf::Cpf;
use lotes_core::entities::UserProfile;
use lotes_core::enums::{AppRole, EntityType};
use lotes_core::errors::{CoreError, ValidationError};
use lotes_core::identity::SessionContext;
use lotes_core::ids::PREFIX_USER;
use lotes_core::responses::PersonalDataExport;

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_string, parse_datetime, parse_enum, parse_optional_datetime, read_count,
};
use crate::service::LotesService;

const USER_COLUMNS: &str = "id, cpf, name, email, role, privacy_consent, access_log_consent, \
     consented_at, policy_version, created_at";

fn row_to_user(row: &libsql::Row) -> Result<UserProfile, DatabaseError> {
    Ok(UserProfile {
        id: row.get::<String>(0)?,
        cpf: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        email: get_opt_string(row, 3)?,
        role: parse_enum(&row.get::<String>(4)?)?,
        privacy_consent: get_bool(row, 5)?,
        access_log_consent: get_bool(row, 6)?,
        consented_at: parse_optional_datetime(get_opt_string(row, 7)?.as_deref())?,
        policy_version: get_opt_string(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

/// Input for [`LotesService::register_user`].
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    /// CPF with or without the `000.000.000-00` mask.
    pub cpf: String,
    pub name: String,
    pub email: Option<String>,
    pub role: AppRole,
    pub accept_privacy_policy: bool,
    pub access_log_consent: bool,
}

impl LotesService {
    /// Register a user after validating the CPF and recording consent.
    ///
    /// Registering an admin requires an admin `actor`, except for the very
    /// first admin of an empty registry.
    ///
    /// # Errors
    ///
    /// `InvalidCpf`, `MissingField("name")`, `PrivacyConsentRequired`,
    /// `Unauthorized`, or a UNIQUE violation when the CPF is already registered.
    pub async fn register_user(
        &self,
        actor: Option<&SessionContext>,
        new: NewUser,
    ) -> Result<UserProfile, DatabaseError> {
        let cpf = Cpf::parse(&new.cpf)?;
        let name = new.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if !new.accept_privacy_policy {
            return Err(ValidationError::PrivacyConsentRequired.into());
        }
        if new.role.is_admin() && !actor.is_some_and(SessionContext::is_admin) {
            if self.count_admins().await? > 0 {
                tracing::warn!("refused admin registration without an admin actor");
                return Err(CoreError::unauthorized("register admin").into());
            }
            tracing::info!("bootstrapping first admin");
        }
        let email = new
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from);

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_USER).await?;
        let policy_version = self.privacy().policy_version.clone();
        self.db()
            .conn()
            .execute(
                "INSERT INTO users (id, cpf, name, email, role, privacy_consent, access_log_consent,
                                    consented_at, policy_version, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7, ?8, ?7)",
                libsql::params![
                    id.as_str(),
                    cpf.as_str(),
                    name,
                    email.as_deref(),
                    new.role.as_str(),
                    i64::from(new.access_log_consent),
                    now.to_rfc3339(),
                    policy_version.as_str()
                ],
            )
            .await?;

        tracing::debug!(user_id = %id, role = %new.role, "registered user");
        Ok(UserProfile {
            id,
            cpf: cpf.into_inner(),
            name: name.to_string(),
            email,
            role: new.role,
            privacy_consent: true,
            access_log_consent: new.access_log_consent,
            consented_at: Some(now),
            policy_version: Some(policy_version),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// `NotFound` when no user has this id.
    pub async fn get_user(&self, id: &str) -> Result<UserProfile, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::User, id))?;
        row_to_user(&row)
    }

    /// Look a user up by CPF (masked or bare).
    ///
    /// # Errors
    ///
    /// `InvalidCpf` or `NotFound`.
    pub async fn find_user_by_cpf(&self, raw_cpf: &str) -> Result<UserProfile, DatabaseError> {
        let cpf = Cpf::parse(raw_cpf)?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE cpf = ?1"),
                [cpf.as_str()],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::User, cpf.masked()))?;
        row_to_user(&row)
    }

    /// Build the per-invocation session for `user_id`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user does not exist.
    pub async fn session_for(&self, user_id: &str) -> Result<SessionContext, DatabaseError> {
        let user = self.get_user(user_id).await?;
        Ok(SessionContext {
            user_id: user.id,
            cpf: user.cpf,
            name: user.name,
            role: user.role,
            access_log_consent: user.access_log_consent,
        })
    }

    /// Change the caller's name and/or access-log consent.
    ///
    /// # Errors
    ///
    /// `MissingField("name")` for a blank name, or a persistence error.
    pub async fn update_profile(
        &self,
        ctx: &SessionContext,
        name: Option<&str>,
        access_log_consent: Option<bool>,
    ) -> Result<UserProfile, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ValidationError::MissingField("name").into());
            }
            params.push(name.into());
            sets.push(format!("name = ?{}", params.len()));
        }
        if let Some(consent) = access_log_consent {
            params.push(i64::from(consent).into());
            sets.push(format!("access_log_consent = ?{}", params.len()));
        }
        if sets.is_empty() {
            return self.get_user(&ctx.user_id).await;
        }

        params.push(ctx.user_id.as_str().into());
        let sql = format!(
            "UPDATE users SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        tracing::debug!(user_id = %ctx.user_id, ?access_log_consent, "updated profile");
        self.get_user(&ctx.user_id).await
    }

    /// Stop recording the caller's parcel views.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn revoke_access_log_consent(
        &self,
        ctx: &SessionContext,
    ) -> Result<UserProfile, DatabaseError> {
        self.update_profile(ctx, None, Some(false)).await
    }

    /// Change another user's role. Admin only; admins cannot demote themselves.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, or a persistence error.
    pub async fn set_role(
        &self,
        ctx: &SessionContext,
        user_id: &str,
        role: AppRole,
    ) -> Result<UserProfile, DatabaseError> {
        ctx.require_admin("change user role")?;
        if user_id == ctx.user_id && !role.is_admin() {
            return Err(CoreError::unauthorized("remove own admin role").into());
        }
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE users SET role = ?1 WHERE id = ?2",
                libsql::params![role.as_str(), user_id],
            )
            .await?;
        if changed == 0 {
            return Err(CoreError::not_found(EntityType::User, user_id).into());
        }
        tracing::info!(user_id, %role, by = %ctx.user_id, "changed role");
        self.get_user(user_id).await
    }

    /// Everything stored about the caller, as a portable document.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn export_personal_data(
        &self,
        ctx: &SessionContext,
    ) -> Result<PersonalDataExport, DatabaseError> {
        let profile = self.get_user(&ctx.user_id).await?;
        let count = self.count_my_access_logs(ctx).await?;
        Ok(PersonalDataExport::build(&profile, count, Utc::now()))
    }

    async fn count_admins(&self) -> Result<u64, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM users WHERE role = 'admin'", ())
            .await?;
        read_count(rows).await
    }
}
