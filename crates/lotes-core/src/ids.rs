//! ID prefix constants.
//!
//! IDs are `{prefix}-{8 hex chars}`, generated by `LotesDb::generate_id`.

pub const PREFIX_PARCEL: &str = "lot";
pub const PREFIX_CONSTRUCTION: &str = "con";
pub const PREFIX_AREA_AUDIT: &str = "alt";
pub const PREFIX_ACCESS_LOG: &str = "acc";
pub const PREFIX_USER: &str = "usr";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_PARCEL,
    PREFIX_CONSTRUCTION,
    PREFIX_AREA_AUDIT,
    PREFIX_ACCESS_LOG,
    PREFIX_USER,
];

/// Check that `id` looks like `{prefix}-{8 hex}`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
