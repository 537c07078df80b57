use chrono::NaiveDate;
use lotes_core::area::Area;
use lotes_core::ledger::AreaChange;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an area in m². Accepts `,` or `.` as the decimal separator.
pub fn parse_area(raw: &str, field: &str) -> anyhow::Result<Area> {
    raw.parse::<Area>()
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a ledger entry `built:demolished:YYYY-MM-DD`. An empty demolished part is zero.
pub fn parse_entry(raw: &str) -> anyhow::Result<AreaChange> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    let [built, demolished, date] = parts.as_slice() else {
        anyhow::bail!("invalid entry '{raw}': expected built:demolished:YYYY-MM-DD");
    };
    let built = parse_area(built, "built area")?;
    let demolished = if demolished.is_empty() {
        Area::ZERO
    } else {
        parse_area(demolished, "demolished area")?
    };
    let approved_on = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid approval date '{date}': {error}"))?;
    Ok(AreaChange::new(built, demolished, approved_on))
}

/// Parse every entry, reporting the first malformed one by position.
pub fn parse_entries(raw: &[String]) -> anyhow::Result<Vec<AreaChange>> {
    raw.iter()
        .enumerate()
        .map(|(index, entry)| {
            parse_entry(entry).map_err(|error| error.context(format!("entry #{}", index + 1)))
        })
        .collect()
}
