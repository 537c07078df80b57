//! Response payloads returned by `LotesService` and printed as JSON by `lotes`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::entities::{AccessLog, AreaChangeAudit, ConstructionRecord, Parcel, UserProfile};
use crate::ledger::LedgerStep;

/// Result of applying one or more ledger changes to a parcel.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LedgerOutcome {
    pub parcel: Parcel,
    pub records: Vec<ConstructionRecord>,
    pub audits: Vec<AreaChangeAudit>,
}

impl LedgerOutcome {
    /// Net change across every record in the outcome.
    #[must_use]
    pub fn net_delta(&self) -> Area {
        self.audits
            .iter()
            .fold(Area::ZERO, |acc, audit| acc + audit.delta())
    }
}

/// Result of a direct area edit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DirectEditOutcome {
    pub parcel: Parcel,
    pub audit: AreaChangeAudit,
}

/// An area audit row with the actor's display name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AreaChangeView {
    #[serde(flatten)]
    pub audit: AreaChangeAudit,
    pub changed_by_name: Option<String>,
}

/// Identifying fields of a parcel, shown next to access-log rows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParcelSummary {
    pub iptu_number: String,
    pub lot_number: String,
    pub subdivision: String,
}

/// An access-log row joined with the parcel it refers to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AccessLogView {
    #[serde(flatten)]
    pub log: AccessLog,
    pub parcel: Option<ParcelSummary>,
}

/// Everything the parcel details screen shows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParcelDetails {
    pub parcel: Parcel,
    pub constructions: Vec<ConstructionRecord>,
    pub area_history: Vec<AreaChangeView>,
    /// The access entry written for this view, if the viewer consented to logging.
    pub access_recorded: Option<AccessLog>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_parcels: u64,
    pub total_constructions: u64,
    /// Only populated for admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_access_logs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonalData {
    pub name: String,
    pub email: Option<String>,
    pub cpf: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConsentRecord {
    pub privacy_policy: bool,
    pub access_logging: bool,
    pub consented_at: Option<DateTime<Utc>>,
    pub policy_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AccessLogSummary {
    pub total_records: u64,
    pub note: String,
}

/// Note attached to the access-log section of a personal data export.
pub const EXPORT_ACCESS_LOG_NOTE: &str =
    "For the full access-log details, contact the Data Protection Officer (DPO).";

/// Data-subject export of everything stored about the caller.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonalDataExport {
    pub personal_data: PersonalData,
    pub consents: ConsentRecord,
    pub access_logs: AccessLogSummary,
    pub exported_at: DateTime<Utc>,
}

impl PersonalDataExport {
    #[must_use]
    pub fn build(profile: &UserProfile, access_log_count: u64, exported_at: DateTime<Utc>) -> Self {
        Self {
            personal_data: PersonalData {
                name: profile.name.clone(),
                email: profile.email.clone(),
                cpf: profile.cpf.clone(),
                registered_at: profile.created_at,
            },
            consents: ConsentRecord {
                privacy_policy: profile.privacy_consent,
                access_logging: profile.access_log_consent,
                consented_at: profile.consented_at,
                policy_version: profile.policy_version.clone(),
            },
            access_logs: AccessLogSummary {
                total_records: access_log_count,
                note: EXPORT_ACCESS_LOG_NOTE.to_string(),
            },
            exported_at,
        }
    }
}

/// Summary returned by `lotes privacy anonymize`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnonymizeResponse {
    pub anonymized: u64,
}

/// A planned batch shown before it is applied (`area change --dry-run`).
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq, Eq)]
pub struct LedgerPreview {
    pub parcel_id: String,
    pub steps: Vec<LedgerStep>,
}
