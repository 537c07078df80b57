//! Shared test utilities for lotes-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use lotes_config::LotesConfig;
    use lotes_core::area::Area;
    use lotes_core::entities::Parcel;
    use lotes_core::enums::AppRole;
    use lotes_core::identity::SessionContext;

    use crate::LotesDb;
    use crate::helpers::read_count;
    use crate::repos::parcel::NewParcel;
    use crate::repos::user::NewUser;
    use crate::service::LotesService;

    /// In-memory service with default configuration.
    pub async fn test_service() -> LotesService {
        let db = LotesDb::open_local(":memory:").await.unwrap();
        LotesService::from_db(db, &LotesConfig::default())
    }

    /// Register an admin (no access logging) and a regular user (logging on).
    pub async fn admin_and_user(svc: &LotesService) -> (SessionContext, SessionContext) {
        let admin = svc
            .register_user(
                None,
                NewUser {
                    cpf: "52998224725".to_string(),
                    name: "Ana Souza".to_string(),
                    role: AppRole::Admin,
                    accept_privacy_policy: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let user = svc
            .register_user(
                None,
                NewUser {
                    cpf: "11144477735".to_string(),
                    name: "Bruno Lima".to_string(),
                    accept_privacy_policy: true,
                    access_log_consent: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        (
            svc.session_for(&admin.id).await.unwrap(),
            svc.session_for(&user.id).await.unwrap(),
        )
    }

    pub fn new_parcel(area_m2: i64) -> NewParcel {
        NewParcel {
            iptu_number: "123456789012".to_string(),
            cadastral_number: "01.02.003.0004".to_string(),
            subdivision: "Jardim Europa".to_string(),
            block: "A".to_string(),
            lot_number: "12".to_string(),
            total_area: Area::from_whole_m2(area_m2),
            images: Vec::new(),
        }
    }

    /// Create a parcel with no construction history.
    pub async fn parcel_with_area(
        svc: &LotesService,
        admin: &SessionContext,
        area_m2: i64,
    ) -> Parcel {
        svc.create_parcel(admin, new_parcel(area_m2), &[])
            .await
            .unwrap()
            .parcel
    }

    pub async fn count_rows(svc: &LotesService, table: &str) -> u64 {
        let rows = svc
            .db()
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await
            .unwrap();
        read_count(rows).await.unwrap()
    }
}
