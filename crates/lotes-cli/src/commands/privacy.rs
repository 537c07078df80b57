use lotes_core::navigation::Route;
use lotes_core::responses::{AnonymizeResponse, ConsentRecord};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PrivacyCommands;
use crate::commands::shared::errors::user_error;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PrivacyStatus {
    policy_version: String,
    anonymized_placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    consents: Option<ConsentRecord>,
}

/// Handle `lotes privacy`.
pub async fn handle(
    action: &PrivacyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PrivacyCommands::Show => {
            ctx.check(Route::PrivacyPolicy)?;
            let consents = match &ctx.session {
                Some(session) => {
                    let profile = ctx
                        .service
                        .get_user(&session.user_id)
                        .await
                        .map_err(user_error)?;
                    Some(ConsentRecord {
                        privacy_policy: profile.privacy_consent,
                        access_logging: profile.access_log_consent,
                        consented_at: profile.consented_at,
                        policy_version: profile.policy_version,
                    })
                }
                None => None,
            };
            let status = PrivacyStatus {
                policy_version: ctx.config.privacy.policy_version.clone(),
                anonymized_placeholder: ctx.config.privacy.anonymized_placeholder.clone(),
                consents,
            };
            output(&status, flags.format)
        }
        PrivacyCommands::Consent => {
            let session = ctx.require(Route::MyData)?;
            let profile = ctx
                .service
                .update_profile(session, None, Some(true))
                .await
                .map_err(user_error)?;
            output(&profile, flags.format)
        }
        PrivacyCommands::Revoke => {
            let session = ctx.require(Route::MyData)?;
            let profile = ctx
                .service
                .revoke_access_log_consent(session)
                .await
                .map_err(user_error)?;
            output(&profile, flags.format)
        }
        PrivacyCommands::Anonymize => {
            let session = ctx.require(Route::MyData)?;
            let anonymized = ctx
                .service
                .anonymize_my_access_logs(session)
                .await
                .map_err(user_error)?;
            output(&AnonymizeResponse { anonymized }, flags.format)
        }
        PrivacyCommands::Export => {
            let session = ctx.require(Route::MyData)?;
            let export = ctx
                .service
                .export_personal_data(session)
                .await
                .map_err(user_error)?;
            output(&export, flags.format)
        }
    }
}
