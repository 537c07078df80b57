use lotes_core::navigation::Route;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::user_error;
use crate::commands::shared::parse::parse_area;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    parcel_id: &str,
    area: &str,
    reason: Option<&str>,
    expected_version: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.require(Route::EditParcel)?;
    let new_area = parse_area(area, "area")?;
    let outcome = ctx
        .service
        .apply_direct_edit(session, parcel_id, new_area, reason, expected_version)
        .await
        .map_err(user_error)?;
    output(&outcome, flags.format)
}
