mod create;
mod details;
mod list;
mod search;
mod update;

use lotes_core::navigation::Route;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ParcelCommands;
use crate::commands::shared::errors::user_error;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lotes parcel`.
pub async fn handle(
    action: &ParcelCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ParcelCommands::Create {
            iptu,
            cadastral,
            subdivision,
            block,
            lot,
            area,
            images,
            entries,
        } => {
            let params = create::Params {
                iptu: iptu.clone(),
                cadastral: cadastral.clone(),
                subdivision: subdivision.clone(),
                block: block.clone(),
                lot: lot.clone(),
                area: area.clone(),
                images: images.clone(),
                entries: entries.clone(),
            };
            create::run(params, ctx, flags).await
        }
        ParcelCommands::Update {
            id,
            iptu,
            cadastral,
            subdivision,
            block,
            lot,
            images,
            clear_images,
        } => {
            let params = update::Params {
                id: id.clone(),
                iptu: iptu.clone(),
                cadastral: cadastral.clone(),
                subdivision: subdivision.clone(),
                block: block.clone(),
                lot: lot.clone(),
                images: images.clone(),
                clear_images: *clear_images,
            };
            update::run(params, ctx, flags).await
        }
        ParcelCommands::Get { id } => {
            ctx.require(Route::Parcels)?;
            let parcel = ctx.service.get_parcel(id).await.map_err(user_error)?;
            output(&parcel, flags.format)
        }
        ParcelCommands::List { limit } => list::run(*limit, ctx, flags).await,
        ParcelCommands::Search {
            iptu,
            cadastral,
            subdivision,
            block,
            lot,
            limit,
        } => {
            let filter = lotes_db::repos::parcel::ParcelFilter {
                iptu_number: iptu.clone(),
                cadastral_number: cadastral.clone(),
                subdivision: subdivision.clone(),
                block: block.clone(),
                lot_number: lot.clone(),
                limit: *limit,
            };
            search::run(filter, ctx, flags).await
        }
        ParcelCommands::Details { id } => details::run(id, ctx, flags).await,
    }
}
