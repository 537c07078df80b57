use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Names accepted by `lotes schema`, in display order.
pub const SCHEMA_NAMES: &[&str] = &[
    "parcel",
    "construction_record",
    "area_change_audit",
    "access_log",
    "user_profile",
    "area_change",
    "session_context",
    "ledger_outcome",
    "direct_edit_outcome",
    "ledger_preview",
    "parcel_details",
    "dashboard_stats",
    "personal_data_export",
    "anonymize_response",
];

/// JSON Schema for a registered type name.
#[must_use]
pub fn schema_named(name: &str) -> Option<Schema> {
    use lotes_core::{entities, identity, ledger, responses};

    let schema = match name {
        "parcel" => schema_for!(entities::Parcel),
        "construction_record" => schema_for!(entities::ConstructionRecord),
        "area_change_audit" => schema_for!(entities::AreaChangeAudit),
        "access_log" => schema_for!(entities::AccessLog),
        "user_profile" => schema_for!(entities::UserProfile),
        "area_change" => schema_for!(ledger::AreaChange),
        "session_context" => schema_for!(identity::SessionContext),
        "ledger_outcome" => schema_for!(responses::LedgerOutcome),
        "direct_edit_outcome" => schema_for!(responses::DirectEditOutcome),
        "ledger_preview" => schema_for!(responses::LedgerPreview),
        "parcel_details" => schema_for!(responses::ParcelDetails),
        "dashboard_stats" => schema_for!(responses::DashboardStats),
        "personal_data_export" => schema_for!(responses::PersonalDataExport),
        "anonymize_response" => schema_for!(responses::AnonymizeResponse),
        _ => return None,
    };
    Some(schema)
}

/// Handle `lotes schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let name = args.type_name.trim().to_ascii_lowercase().replace('-', "_");
    if name == "list" {
        return output(&SCHEMA_NAMES, flags.format);
    }
    let schema = schema_named(&name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown schema type '{}'. Available: {}",
            args.type_name,
            SCHEMA_NAMES.join(", ")
        )
    })?;
    output(&schema, flags.format)
}
