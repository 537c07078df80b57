use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::area::Area;

/// A registered land parcel (lote).
///
/// `total_area` only changes through the area ledger. `version` increments on
/// every ledger write and backs the optimistic concurrency check.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Parcel {
    pub id: String,
    pub iptu_number: String,
    pub cadastral_number: String,
    pub subdivision: String,
    pub block: String,
    pub lot_number: String,
    pub total_area: Area,
    pub images: Vec<String>,
    pub created_by: String,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Group the first 12 digits of `raw` in threes: `123.456.789.012`.
#[must_use]
pub fn format_iptu(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).take(12).collect();
    digits
        .chunks(3)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(".")
}

/// Keep `[A-Za-z0-9 -]` and upper-case the rest, for free-text search fields.
#[must_use]
pub fn sanitize_search_term(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}
