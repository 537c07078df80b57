mod change;
mod edit;

use lotes_core::navigation::Route;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AreaCommands;
use crate::commands::shared::errors::user_error;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lotes area`.
pub async fn handle(
    action: &AreaCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AreaCommands::Change {
            parcel_id,
            entries,
            expected_version,
            dry_run,
        } => change::run(parcel_id, entries, *expected_version, *dry_run, ctx, flags).await,
        AreaCommands::Edit {
            parcel_id,
            area,
            reason,
            expected_version,
        } => {
            edit::run(
                parcel_id,
                area,
                reason.as_deref(),
                *expected_version,
                ctx,
                flags,
            )
            .await
        }
        AreaCommands::History { parcel_id } => {
            ctx.require(Route::ParcelDetails)?;
            let history = ctx
                .service
                .area_history(parcel_id)
                .await
                .map_err(user_error)?;
            output(&history, flags.format)
        }
    }
}
