use lotes_core::navigation::Route;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LogsCommands;
use crate::commands::shared::errors::user_error;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lotes logs`.
pub async fn handle(
    action: &LogsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LogsCommands::List { limit } => {
            let session = ctx.require(Route::AccessLogs)?;
            let logs = ctx
                .service
                .list_access_logs(session, limit.or(flags.limit))
                .await
                .map_err(user_error)?;
            output(&logs, flags.format)
        }
    }
}
