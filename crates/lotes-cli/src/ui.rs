use std::io::IsTerminal;
use std::sync::OnceLock;

use lotes_core::cpf::ANONYMIZED_CPF;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();
static ANONYMIZED_PLACEHOLDER: OnceLock<String> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let is_tty = std::io::stdout().is_terminal();
    let table_color = match flags.color {
        ColorMode::Always => flags.format == OutputFormat::Table,
        ColorMode::Never => false,
        ColorMode::Auto => {
            is_tty
                && flags.format == OutputFormat::Table
                && !flags.quiet
                && std::env::var_os("NO_COLOR").is_none()
        }
    };

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    let _ = UI_PREFS.set(UiPrefs {
        table_color,
        term_width,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        term_width: None,
    })
}

/// Record `privacy.anonymized_placeholder` once the config is loaded.
pub fn set_anonymized_placeholder(placeholder: &str) {
    let _ = ANONYMIZED_PLACEHOLDER.set(placeholder.to_string());
}

/// The configured anonymization placeholder, or the default before config loads.
#[must_use]
pub fn anonymized_placeholder() -> &'static str {
    ANONYMIZED_PLACEHOLDER
        .get()
        .map_or(ANONYMIZED_CPF, String::as_str)
}
