use clap::Subcommand;

/// Area ledger commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AreaCommands {
    /// Apply construction/demolition entries in order (admin). All-or-nothing.
    Change {
        parcel_id: String,
        /// `built:demolished:YYYY-MM-DD` (repeatable).
        #[arg(long = "entry", required = true)]
        entries: Vec<String>,
        /// Parcel version the entries were prepared against.
        #[arg(long)]
        expected_version: Option<i64>,
        /// Show the planned steps without writing.
        #[arg(long)]
        dry_run: bool,
    },
    /// Set the area directly, recording an audit row (admin).
    Edit {
        parcel_id: String,
        /// New area in m².
        #[arg(long)]
        area: String,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        expected_version: Option<i64>,
    },
    /// Area-change history, newest first.
    History { parcel_id: String },
}
