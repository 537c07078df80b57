use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AreaCommands, CpfCommands, LogsCommands, ParcelCommands, PrivacyCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Registration, identity and roles.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Parcels (lotes).
    Parcel {
        #[command(subcommand)]
        action: ParcelCommands,
    },
    /// Area ledger: constructions, demolitions and direct edits.
    Area {
        #[command(subcommand)]
        action: AreaCommands,
    },
    /// Access logs (admin).
    Logs {
        #[command(subcommand)]
        action: LogsCommands,
    },
    /// Privacy: consent, anonymization and personal data export.
    Privacy {
        #[command(subcommand)]
        action: PrivacyCommands,
    },
    /// Parcel, construction and access-log counts.
    Dashboard,
    /// Sections available to the current user.
    Menu,
    /// CPF validation and formatting.
    Cpf {
        #[command(subcommand)]
        action: CpfCommands,
    },
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `lotes schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered type name (e.g. parcel, area_change_audit). `list` prints all names.
    pub type_name: String,
}
