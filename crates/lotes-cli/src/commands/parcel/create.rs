use lotes_core::navigation::Route;
use lotes_db::repos::parcel::NewParcel;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::user_error;
use crate::commands::shared::parse::{parse_area, parse_entries};
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub iptu: String,
    pub cadastral: String,
    pub subdivision: String,
    pub block: String,
    pub lot: String,
    pub area: String,
    pub images: Vec<String>,
    pub entries: Vec<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.require(Route::NewParcel)?;
    let history = parse_entries(&params.entries)?;
    let new = NewParcel {
        iptu_number: params.iptu,
        cadastral_number: params.cadastral,
        subdivision: params.subdivision,
        block: params.block,
        lot_number: params.lot,
        total_area: parse_area(&params.area, "area")?,
        images: params.images,
    };

    let outcome = ctx
        .service
        .create_parcel(session, new, &history)
        .await
        .map_err(user_error)?;
    output(&outcome, flags.format)
}
