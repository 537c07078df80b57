use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Parcel { action } => commands::parcel::handle(&action, ctx, flags).await,
        Commands::Area { action } => commands::area::handle(&action, ctx, flags).await,
        Commands::Logs { action } => commands::logs::handle(&action, ctx, flags).await,
        Commands::Privacy { action } => commands::privacy::handle(&action, ctx, flags).await,
        Commands::Dashboard => commands::dashboard::handle(ctx, flags).await,
        Commands::Menu => commands::dashboard::handle_menu(ctx, flags),
        Commands::Schema(_) | Commands::Cpf { .. } => {
            unreachable!("schema/cpf are pre-dispatched in main")
        }
    }
}
