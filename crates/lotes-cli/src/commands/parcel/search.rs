use lotes_core::navigation::Route;
use lotes_db::repos::parcel::ParcelFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::user_error;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    mut filter: ParcelFilter,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require(Route::Search)?;
    filter.limit = filter.limit.or(flags.limit);
    let parcels = ctx
        .service
        .search_parcels(&filter)
        .await
        .map_err(user_error)?;
    output(&parcels, flags.format)
}
