use clap::Subcommand;

/// Access-log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LogsCommands {
    /// Most recent parcel views.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
}
