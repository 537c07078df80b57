//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::{NaiveDate, Utc};
use lotes_core::area::Area;
use lotes_core::entities::*;
use lotes_core::enums::AppRole;
use lotes_core::identity::SessionContext;
use lotes_core::ledger::AreaChange;
use lotes_core::responses::*;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn m2(v: f64) -> Area {
    Area::from_m2(v).unwrap()
}

fn sample_parcel() -> Parcel {
    Parcel {
        id: "lot-a3f8b2c1".into(),
        iptu_number: "123.456.0001-2".into(),
        cadastral_number: "01.02.003.0004".into(),
        subdivision: "JARDIM AMERICA".into(),
        block: "B".into(),
        lot_number: "12".into(),
        total_area: m2(360.5),
        images: vec!["https://img.example/lote-12-frente.jpg".into()],
        created_by: "usr-00000001".into(),
        version: 3,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_audit() -> AreaChangeAudit {
    AreaChangeAudit {
        id: "alt-0badf00d".into(),
        parcel_id: "lot-a3f8b2c1".into(),
        area_before: m2(310.5),
        area_after: m2(360.5),
        reason: Some("Construção: +50m² construídos".into()),
        changed_by: "usr-00000001".into(),
        changed_at: Utc::now(),
    }
}

fn sample_access_log() -> AccessLog {
    AccessLog {
        id: "acc-12345678".into(),
        parcel_id: "lot-a3f8b2c1".into(),
        user_cpf: "52998224725".into(),
        accessed_at: Utc::now(),
    }
}

fn sample_construction() -> ConstructionRecord {
    ConstructionRecord {
        id: "con-deadbeef".into(),
        parcel_id: "lot-a3f8b2c1".into(),
        built_area: m2(50.0),
        demolished_area: Area::ZERO,
        approved_on: NaiveDate::from_ymd_opt(2023, 11, 20).unwrap(),
        created_at: Utc::now(),
    }
}

fn sample_user() -> UserProfile {
    UserProfile {
        id: "usr-00000001".into(),
        cpf: "52998224725".into(),
        name: "Maria Souza".into(),
        email: Some("maria@example.com".into()),
        role: AppRole::Admin,
        privacy_consent: true,
        access_log_consent: true,
        consented_at: Some(Utc::now()),
        policy_version: Some("1.0".into()),
        created_at: Utc::now(),
    }
}

roundtrip_and_validate!(parcel_roundtrip, Parcel, sample_parcel());

roundtrip_and_validate!(
    parcel_without_images_roundtrip,
    Parcel,
    Parcel {
        images: vec![],
        total_area: Area::ZERO,
        ..sample_parcel()
    }
);

roundtrip_and_validate!(
    construction_roundtrip,
    ConstructionRecord,
    sample_construction()
);

roundtrip_and_validate!(area_audit_roundtrip, AreaChangeAudit, sample_audit());

roundtrip_and_validate!(
    direct_edit_audit_roundtrip,
    AreaChangeAudit,
    AreaChangeAudit {
        reason: None,
        ..sample_audit()
    }
);

roundtrip_and_validate!(access_log_roundtrip, AccessLog, sample_access_log());

roundtrip_and_validate!(user_roundtrip, UserProfile, sample_user());

roundtrip_and_validate!(
    user_without_consent_roundtrip,
    UserProfile,
    UserProfile {
        email: None,
        role: AppRole::User,
        access_log_consent: false,
        consented_at: None,
        policy_version: None,
        ..sample_user()
    }
);

roundtrip_and_validate!(
    session_context_roundtrip,
    SessionContext,
    SessionContext {
        user_id: "usr-00000001".into(),
        cpf: "52998224725".into(),
        name: "Maria Souza".into(),
        role: AppRole::User,
        access_log_consent: true,
    }
);

roundtrip_and_validate!(
    area_change_roundtrip,
    AreaChange,
    AreaChange::new(
        m2(12.25),
        m2(3.0),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    )
);

roundtrip_and_validate!(
    ledger_outcome_roundtrip,
    LedgerOutcome,
    LedgerOutcome {
        parcel: sample_parcel(),
        records: vec![sample_construction()],
        audits: vec![sample_audit()],
    }
);

roundtrip_and_validate!(
    parcel_details_roundtrip,
    ParcelDetails,
    ParcelDetails {
        parcel: sample_parcel(),
        constructions: vec![sample_construction()],
        area_history: vec![AreaChangeView {
            audit: sample_audit(),
            changed_by_name: Some("Maria Souza".into()),
        }],
        access_recorded: Some(sample_access_log()),
    }
);

roundtrip_and_validate!(
    access_log_view_roundtrip,
    AccessLogView,
    AccessLogView {
        log: sample_access_log(),
        parcel: Some(ParcelSummary {
            iptu_number: "123.456.0001-2".into(),
            lot_number: "12".into(),
            subdivision: "JARDIM AMERICA".into(),
        }),
    }
);

roundtrip_and_validate!(
    dashboard_stats_user_roundtrip,
    DashboardStats,
    DashboardStats {
        total_parcels: 42,
        total_constructions: 17,
        total_access_logs: None,
    }
);

roundtrip_and_validate!(
    dashboard_stats_admin_roundtrip,
    DashboardStats,
    DashboardStats {
        total_parcels: 42,
        total_constructions: 17,
        total_access_logs: Some(311),
    }
);

roundtrip_and_validate!(
    personal_data_export_roundtrip,
    PersonalDataExport,
    PersonalDataExport::build(&sample_user(), 9, Utc::now())
);

#[test]
fn export_carries_dpo_note_and_count() {
    let export = PersonalDataExport::build(&sample_user(), 9, Utc::now());
    let json = serde_json::to_value(&export).unwrap();
    assert_eq!(json["access_logs"]["total_records"], 9);
    assert_eq!(json["access_logs"]["note"], EXPORT_ACCESS_LOG_NOTE);
    assert_eq!(json["personal_data"]["cpf"], "52998224725");
    assert_eq!(json["consents"]["policy_version"], "1.0");
}

#[test]
fn dashboard_stats_hide_access_logs_for_users() {
    let stats = DashboardStats {
        total_parcels: 1,
        total_constructions: 0,
        total_access_logs: None,
    };
    let json = serde_json::to_value(&stats).unwrap();
    assert!(json.get("total_access_logs").is_none());
}

#[test]
fn area_serializes_as_number_in_entities() {
    let json = serde_json::to_value(sample_parcel()).unwrap();
    assert_eq!(json["total_area"], serde_json::json!(360.5));
}
