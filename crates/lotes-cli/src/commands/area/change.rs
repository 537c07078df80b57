use lotes_core::navigation::Route;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::user_error;
use crate::commands::shared::parse::parse_entries;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    parcel_id: &str,
    entries: &[String],
    expected_version: Option<i64>,
    dry_run: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.require(Route::EditParcel)?;
    let changes = parse_entries(entries)?;

    if dry_run {
        let preview = ctx
            .service
            .preview_changes(session, parcel_id, &changes)
            .await
            .map_err(user_error)?;
        return output(&preview, flags.format);
    }

    let outcome = ctx
        .service
        .apply_changes(session, parcel_id, &changes, expected_version)
        .await
        .map_err(user_error)?;
    tracing::info!(
        parcel_id,
        entries = outcome.records.len(),
        net = %outcome.net_delta(),
        version = outcome.parcel.version,
        "area ledger updated"
    );
    output(&outcome, flags.format)
}
