use clap::Subcommand;

/// CPF utilities.
#[derive(Clone, Debug, Subcommand)]
pub enum CpfCommands {
    /// Validate check digits.
    Check { cpf: String },
    /// Print as `XXX.XXX.XXX-XX`.
    Format { cpf: String },
}
