use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user. The first admin may register without `--as`.
    Register {
        /// CPF, with or without the mask.
        #[arg(long)]
        cpf: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        /// Register with the admin role (needs an admin `--as`, except the first one).
        #[arg(long)]
        admin: bool,
        /// Accept the privacy policy (required).
        #[arg(long)]
        accept_privacy_policy: bool,
        /// Allow parcel views to be logged with this user's CPF.
        #[arg(long)]
        access_log_consent: bool,
    },
    /// Show the acting user's session.
    Whoami,
    /// Change the acting user's display name.
    Update {
        #[arg(long)]
        name: String,
    },
    /// Set another user's role (admin).
    Role {
        user_id: String,
        /// admin or user
        #[arg(long)]
        role: String,
    },
}
