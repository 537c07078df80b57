//! CPF (Brazilian individual taxpayer number) validation and masking.
//!
//! A CPF is 11 digits whose last two are check digits computed with a
//! descending-weight mod-11 scheme. Inputs are expected with the mask already
//! stripped; [`strip_mask`] does that for `000.000.000-00` style input.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Placeholder written over a CPF when access logs are anonymized.
pub const ANONYMIZED_CPF: &str = "***.***.***-**";

const CPF_LEN: usize = 11;

/// Check a bare 11-digit CPF. Total over all inputs: anything malformed is `false`.
#[must_use]
pub fn is_valid_cpf(cpf: &str) -> bool {
    let bytes = cpf.as_bytes();
    if bytes.len() != CPF_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let digits: Vec<u32> = bytes.iter().map(|b| u32::from(b - b'0')).collect();

    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    digits[9] == check_digit(&digits[..9]) && digits[10] == check_digit(&digits[..10])
}

/// Weighted mod-11 check digit over `digits`, weights descending to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let mut weight = u32::try_from(digits.len()).unwrap_or(0) + 1;
    let mut sum = 0;
    for digit in digits {
        sum += digit * weight;
        weight -= 1;
    }
    let dv = 11 - (sum % 11);
    if dv >= 10 { 0 } else { dv }
}

/// Keep only ASCII digits.
#[must_use]
pub fn strip_mask(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Progressive input mask `000.000.000-00`. Digits beyond 11 are dropped.
#[must_use]
pub fn format_cpf(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).take(CPF_LEN).collect();
    let mut out = String::with_capacity(14);
    for (i, ch) in digits.iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(*ch);
    }
    out
}

/// Display mask keeping only the last two digits: `***.***.**25`.
#[must_use]
pub fn mask_cpf(cpf: &str) -> String {
    if cpf.chars().count() < 4 {
        return "***".to_string();
    }
    let digits = strip_mask(cpf);
    let tail: String = digits
        .chars()
        .skip(digits.chars().count().saturating_sub(2))
        .collect();
    format!("***.***.**{tail}")
}

/// A validated, unmasked CPF.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Strip the mask from `raw` and validate the check digits.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCpf` when the digits do not form a valid CPF.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let digits = strip_mask(raw);
        if is_valid_cpf(&digits) {
            Ok(Self(digits))
        } else {
            Err(ValidationError::InvalidCpf)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    #[must_use]
    pub fn masked(&self) -> String {
        mask_cpf(&self.0)
    }

    #[must_use]
    pub fn formatted(&self) -> String {
        format_cpf(&self.0)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}
