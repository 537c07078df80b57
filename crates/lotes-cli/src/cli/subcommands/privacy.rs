use clap::Subcommand;

/// Privacy commands for the acting user.
#[derive(Clone, Debug, Subcommand)]
pub enum PrivacyCommands {
    /// Policy version and, when acting as a user, their consents.
    Show,
    /// Allow parcel views to be logged.
    Consent,
    /// Stop logging parcel views.
    Revoke,
    /// Replace your CPF in every access-log row with the placeholder.
    Anonymize,
    /// Export everything stored about you.
    Export,
}
