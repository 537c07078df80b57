use lotes_core::navigation::Route;
use lotes_db::updates::parcel::ParcelUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::user_error;
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub id: String,
    pub iptu: Option<String>,
    pub cadastral: Option<String>,
    pub subdivision: Option<String>,
    pub block: Option<String>,
    pub lot: Option<String>,
    pub images: Vec<String>,
    pub clear_images: bool,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(&params)?;
    let session = ctx.require(Route::EditParcel)?;

    let mut builder = ParcelUpdateBuilder::new();
    if let Some(iptu) = params.iptu {
        builder = builder.iptu_number(iptu);
    }
    if let Some(cadastral) = params.cadastral {
        builder = builder.cadastral_number(cadastral);
    }
    if let Some(subdivision) = params.subdivision {
        builder = builder.subdivision(subdivision);
    }
    if let Some(block) = params.block {
        builder = builder.block(block);
    }
    if let Some(lot) = params.lot {
        builder = builder.lot_number(lot);
    }
    if params.clear_images {
        builder = builder.images(Vec::new());
    } else if !params.images.is_empty() {
        builder = builder.images(params.images);
    }

    let parcel = ctx
        .service
        .update_parcel(session, &params.id, builder.build())
        .await
        .map_err(user_error)?;
    output(&parcel, flags.format)
}

fn validate_update_params(params: &Params) -> anyhow::Result<()> {
    if params.iptu.is_none()
        && params.cadastral.is_none()
        && params.subdivision.is_none()
        && params.block.is_none()
        && params.lot.is_none()
        && params.images.is_empty()
        && !params.clear_images
    {
        anyhow::bail!(
            "At least one of --iptu, --cadastral, --subdivision, --block, --lot, --image or --clear-images must be provided"
        );
    }
    Ok(())
}
