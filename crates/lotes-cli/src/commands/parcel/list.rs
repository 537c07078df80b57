use lotes_core::navigation::Route;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::user_error;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(limit: Option<u32>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require(Route::Parcels)?;
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);
    let parcels = ctx.service.list_parcels(limit).await.map_err(user_error)?;
    output(&parcels, flags.format)
}
