use lotes_core::navigation::Route;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::user_error;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.require(Route::ParcelDetails)?;
    let details = ctx
        .service
        .parcel_details(session, id)
        .await
        .map_err(user_error)?;
    output(&details, flags.format)
}
