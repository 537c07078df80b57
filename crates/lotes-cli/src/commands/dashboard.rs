use lotes_core::navigation::{Route, menu_for};

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::user_error;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lotes dashboard`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.require(Route::Dashboard)?;
    let stats = ctx
        .service
        .dashboard_stats(session)
        .await
        .map_err(user_error)?;
    output(&stats, flags.format)
}

/// Handle `lotes menu`.
pub fn handle_menu(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.require(Route::Dashboard)?;
    output(&menu_for(session.role), flags.format)
}
