//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing and handle the dual datetime
//! format (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, NaiveDate, Utc};
use lotes_core::area::Area;

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a `YYYY-MM-DD` TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` on any other shape.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all lotes-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER centiare column as [`Area`].
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_area(row: &libsql::Row, idx: i32) -> Result<Area, DatabaseError> {
    Ok(Area::from_centiares(row.get::<i64>(idx)?))
}

/// Read an INTEGER 0/1 column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Decode the JSON array stored in `parcels.images`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the column is not a JSON string array.
pub fn parse_string_list(s: &str) -> Result<Vec<String>, DatabaseError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::Query(format!("Invalid JSON list in column: {e}")))
}

/// Encode a string list for a JSON TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn encode_string_list(items: &[String]) -> Result<String, DatabaseError> {
    serde_json::to_string(items).map_err(|e| DatabaseError::Other(e.into()))
}

/// Count rows from a `SELECT COUNT(*)` result.
///
/// # Errors
///
/// Returns `DatabaseError::NoResult` on an empty result.
pub async fn read_count(mut rows: libsql::Rows) -> Result<u64, DatabaseError> {
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    let n = row.get::<i64>(0)?;
    u64::try_from(n).map_err(|_| DatabaseError::InvalidState(format!("negative count {n}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_datetime_formats() {
        let a = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let b = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(a, b);
        assert!(parse_datetime("09/02/2026").is_err());
    }

    #[test]
    fn optional_datetime_treats_empty_as_none() {
        assert!(parse_optional_datetime(None).unwrap().is_none());
        assert!(parse_optional_datetime(Some("")).unwrap().is_none());
    }

    #[test]
    fn string_list_roundtrip_and_empty() {
        let encoded = encode_string_list(&["a.jpg".into(), "b.jpg".into()]).unwrap();
        assert_eq!(parse_string_list(&encoded).unwrap(), vec!["a.jpg", "b.jpg"]);
        assert!(parse_string_list("").unwrap().is_empty());
        assert!(parse_string_list("not json").is_err());
    }

    #[test]
    fn date_is_iso() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
