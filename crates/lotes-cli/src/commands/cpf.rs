use lotes_core::cpf::{format_cpf, is_valid_cpf, mask_cpf, strip_mask};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CpfCommands;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CpfCheck {
    cpf: String,
    valid: bool,
    formatted: String,
    masked: String,
}

fn check(raw: &str) -> CpfCheck {
    let digits = strip_mask(raw);
    CpfCheck {
        valid: is_valid_cpf(&digits),
        formatted: format_cpf(&digits),
        masked: mask_cpf(&digits),
        cpf: digits,
    }
}

/// Handle `lotes cpf`. Needs neither a database nor a session.
pub fn handle(action: &CpfCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        CpfCommands::Check { cpf } => {
            let result = check(cpf);
            if !result.valid {
                tracing::debug!(cpf = %result.masked, "invalid CPF");
            }
            output(&result, flags.format)
        }
        CpfCommands::Format { cpf } => output(&format_cpf(cpf), flags.format),
    }
}
