use clap::Subcommand;

/// Parcel commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ParcelCommands {
    /// Register a parcel, optionally with its construction history (admin).
    Create {
        #[arg(long)]
        iptu: String,
        #[arg(long)]
        cadastral: String,
        #[arg(long)]
        subdivision: String,
        #[arg(long)]
        block: String,
        #[arg(long)]
        lot: String,
        /// Area in m² before any history entry (`,` or `.` as decimal separator).
        #[arg(long)]
        area: String,
        /// Image URL (repeatable).
        #[arg(long = "image")]
        images: Vec<String>,
        /// History entry `built:demolished:YYYY-MM-DD` (repeatable, applied in order).
        #[arg(long = "entry")]
        entries: Vec<String>,
    },
    /// Update descriptive fields and images (admin). The area is changed via `lotes area`.
    Update {
        id: String,
        #[arg(long)]
        iptu: Option<String>,
        #[arg(long)]
        cadastral: Option<String>,
        #[arg(long)]
        subdivision: Option<String>,
        #[arg(long)]
        block: Option<String>,
        #[arg(long)]
        lot: Option<String>,
        /// Replace the image list (repeatable).
        #[arg(long = "image")]
        images: Vec<String>,
        /// Remove every image.
        #[arg(long, conflicts_with = "images")]
        clear_images: bool,
    },
    /// Get a parcel by ID.
    Get { id: String },
    /// List parcels, newest first.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Search by substring on identifying fields (AND-combined).
    Search {
        #[arg(long)]
        iptu: Option<String>,
        #[arg(long)]
        cadastral: Option<String>,
        #[arg(long)]
        subdivision: Option<String>,
        #[arg(long)]
        block: Option<String>,
        #[arg(long)]
        lot: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Parcel with constructions and area history. Logs the view when consented.
    Details { id: String },
}
