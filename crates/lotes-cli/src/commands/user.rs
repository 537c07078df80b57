use lotes_core::enums::AppRole;
use lotes_core::navigation::Route;
use lotes_db::repos::user::NewUser;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::errors::user_error;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lotes user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Register {
            cpf,
            name,
            email,
            admin,
            accept_privacy_policy,
            access_log_consent,
        } => {
            ctx.check(Route::Auth)?;
            let new = NewUser {
                cpf: cpf.clone(),
                name: name.clone(),
                email: email.clone(),
                role: if *admin { AppRole::Admin } else { AppRole::User },
                accept_privacy_policy: *accept_privacy_policy,
                access_log_consent: *access_log_consent,
            };
            let profile = ctx
                .service
                .register_user(ctx.session.as_ref(), new)
                .await
                .map_err(user_error)?;
            output(&profile, flags.format)
        }
        UserCommands::Whoami => {
            let session = ctx.require(Route::Dashboard)?;
            output(session, flags.format)
        }
        UserCommands::Update { name } => {
            let session = ctx.require(Route::MyData)?;
            let profile = ctx
                .service
                .update_profile(session, Some(name), None)
                .await
                .map_err(user_error)?;
            output(&profile, flags.format)
        }
        UserCommands::Role { user_id, role } => {
            let session = ctx.require(Route::Dashboard)?;
            let role = parse_enum::<AppRole>(role, "role")?;
            let profile = ctx
                .service
                .set_role(session, user_id, role)
                .await
                .map_err(user_error)?;
            output(&profile, flags.format)
        }
    }
}
