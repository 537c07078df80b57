//! Response rendering for `--format json|table|raw`.
//!
//! In table mode a response object prints its scalar fields as a field/value
//! table, then one titled section per nested record (`parcel`, `consents`) and
//! one sub-table per list of records (`constructions`, `area_history`,
//! `records`, `audits`). Records nested inside a row flatten into dotted
//! columns such as `parcel.iptu_number`. Area fields print the way `Area`
//! displays them (`150`, `12.5`) rather than as raw floats.

use lotes_core::area::Area;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{EMPTY_CELL, TableOptions};

/// Field names that carry a serialized `Area`.
const AREA_FIELDS: &[&str] = &[
    "total_area",
    "built_area",
    "demolished_area",
    "area_before",
    "area_after",
    "built",
    "demolished",
];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            let options = TableOptions {
                max_width: prefs.term_width,
                color: prefs.table_color,
                anonymized: ui::anonymized_placeholder(),
            };
            Ok(render_value(&serde_json::to_value(value)?, options))
        }
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_value(value: &Value, options: TableOptions<'_>) -> String {
    match value {
        Value::Array(items) => render_rows(items, options),
        Value::Object(map) => render_record(map, options),
        scalar => table::render_table(&["value"], &[vec![cell("value", scalar)]], options),
    }
}

fn render_record(map: &Map<String, Value>, options: TableOptions<'_>) -> String {
    let mut fields = Vec::new();
    let mut sections = Vec::new();
    for (key, value) in map {
        match value {
            Value::Object(inner) => {
                sections.push(section(key, &render_fields(&flatten(inner), options)));
            }
            Value::Array(items) if is_record_list(items) => {
                let title = format!("{key} ({})", items.len());
                sections.push(section(&title, &render_rows(items, options)));
            }
            _ => fields.push((key.clone(), value.clone())),
        }
    }

    let mut blocks = Vec::with_capacity(sections.len() + 1);
    if !fields.is_empty() || sections.is_empty() {
        blocks.push(render_fields(&fields, options));
    }
    blocks.extend(sections);
    blocks.join("\n\n")
}

fn render_fields(fields: &[(String, Value)], options: TableOptions<'_>) -> String {
    let rows = fields
        .iter()
        .map(|(key, value)| vec![key.clone(), cell(key, value)])
        .collect::<Vec<_>>();
    table::render_table(&["field", "value"], &rows, options)
}

fn render_rows(items: &[Value], options: TableOptions<'_>) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![cell("value", item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options);
    }

    let flattened = items
        .iter()
        .filter_map(Value::as_object)
        .map(flatten)
        .collect::<Vec<_>>();

    let mut headers = Vec::<&str>::new();
    for (key, _) in flattened.iter().flatten() {
        if !headers.contains(&key.as_str()) {
            headers.push(key);
        }
    }
    // A record that is null in some rows and filled in others keeps only its dotted columns.
    let all = headers.clone();
    headers.retain(|header| {
        let nested = format!("{header}.");
        !all.iter().any(|other| other.starts_with(&nested))
    });

    let rows = flattened
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| {
                    row.iter()
                        .find(|(key, _)| key == header)
                        .map_or_else(|| EMPTY_CELL.to_string(), |(key, value)| cell(key, value))
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&headers, &rows, options)
}

fn section(title: &str, body: &str) -> String {
    format!("{title}\n{body}")
}

fn is_record_list(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_object)
}

/// Nested objects become dotted keys: `{"parcel": {"id": ..}}` -> `parcel.id`.
fn flatten(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::with_capacity(map.len());
    flatten_into("", map, &mut out);
    out
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(&name, inner, out),
            other => out.push((name, other.clone())),
        }
    }
}

fn cell(key: &str, value: &Value) -> String {
    match value {
        Value::Null => EMPTY_CELL.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Number(n) if is_area_field(key) => n
            .as_f64()
            .and_then(|m2| Area::from_m2(m2).ok())
            .map_or_else(|| n.to_string(), |area| area.to_string()),
        Value::Number(n) => n.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.is_empty() => EMPTY_CELL.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| cell(key, item))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

fn is_area_field(key: &str) -> bool {
    let field = key.rsplit('.').next().unwrap_or(key);
    AREA_FIELDS.contains(&field)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use lotes_core::area::Area;
    use lotes_core::entities::{AreaChangeAudit, ConstructionRecord, Parcel};
    use lotes_core::responses::{AreaChangeView, ParcelDetails};
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    fn plain() -> TableOptions<'static> {
        TableOptions::default()
    }

    fn details() -> ParcelDetails {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let parcel = Parcel {
            id: "lot-0000000a".to_string(),
            iptu_number: "123.456.789.012".to_string(),
            cadastral_number: "01.02.003".to_string(),
            subdivision: "Jardim Europa".to_string(),
            block: "A".to_string(),
            lot_number: "12".to_string(),
            total_area: Area::from_m2(150.5).unwrap(),
            images: vec!["front.jpg".to_string(), "back.jpg".to_string()],
            created_by: "usr-0000000a".to_string(),
            version: 2,
            created_at: at,
            updated_at: at,
        };
        let construction = ConstructionRecord {
            id: "con-0000000a".to_string(),
            parcel_id: parcel.id.clone(),
            built_area: Area::from_whole_m2(50),
            demolished_area: Area::ZERO,
            approved_on: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            created_at: at,
        };
        let audit = AreaChangeAudit {
            id: "alt-0000000a".to_string(),
            parcel_id: parcel.id.clone(),
            area_before: Area::from_m2(100.5).unwrap(),
            area_after: Area::from_m2(150.5).unwrap(),
            reason: Some("Construção: +50m² construídos".to_string()),
            changed_by: "usr-0000000a".to_string(),
            changed_at: at,
        };
        ParcelDetails {
            parcel,
            constructions: vec![construction],
            area_history: vec![AreaChangeView {
                audit,
                changed_by_name: Some("Ana".to_string()),
            }],
            access_recorded: None,
        }
    }

    #[test]
    fn parcel_details_lists_render_as_sub_tables() {
        let out = render_value(&serde_json::to_value(details()).unwrap(), plain());

        assert!(!out.contains("[{"), "nested lists must not print as JSON:\n{out}");
        assert!(out.contains("constructions (1)\n"));
        assert!(out.contains("area_history (1)\n"));
        assert!(out.contains("parcel\n"));

        let history_header = out
            .lines()
            .skip_while(|line| !line.starts_with("area_history"))
            .nth(1)
            .unwrap_or_default();
        assert!(history_header.contains("area_after"));
        assert!(history_header.contains("changed_by_name"));
        assert!(out.contains("Construção: +50m² construídos"));
    }

    #[test]
    fn area_fields_print_like_area_display() {
        let out = render_value(&serde_json::to_value(details()).unwrap(), plain());
        assert!(out.contains("150.5"));
        assert!(out.contains("100.5"));
        assert!(!out.contains("50.0"), "areas must not print as floats:\n{out}");
        assert_eq!(cell("total_area", &json!(150.0)), "150");
        assert_eq!(cell("change.built", &json!(12.5)), "12.5");
        assert_eq!(cell("version", &json!(2)), "2");
    }

    #[test]
    fn scalar_lists_are_inlined() {
        assert_eq!(cell("images", &json!(["front.jpg", "back.jpg"])), "front.jpg, back.jpg");
        assert_eq!(cell("images", &json!([])), EMPTY_CELL);
        assert_eq!(cell("reason", &Value::Null), EMPTY_CELL);
    }

    #[test]
    fn nested_records_in_rows_become_dotted_columns() {
        let logs = json!([
            {"id": "acc-1", "user_cpf": "***.***.***-**", "parcel": {"iptu_number": "123.456", "lot_number": "12"}},
            {"id": "acc-2", "user_cpf": "52998224725", "parcel": null}
        ]);
        let out = render_value(&logs, plain());
        let header = out.lines().next().unwrap_or_default();
        assert!(header.contains("parcel.iptu_number"));
        assert!(header.contains("parcel.lot_number"));
        assert!(!header.split_whitespace().any(|h| h == "parcel"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn record_with_only_scalars_is_a_field_table() {
        #[derive(Serialize)]
        struct Stats {
            total_parcels: u64,
            total_constructions: u64,
        }
        let out = render(
            &Stats {
                total_parcels: 3,
                total_constructions: 7,
            },
            OutputFormat::Table,
        )
        .expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("field")));
        assert!(out.contains("total_parcels"));
        assert!(!out.contains("\n\n"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let rows: Vec<Parcel> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).unwrap(), "(no rows)");
    }

    #[test]
    fn json_and_raw_keep_the_wire_shape() {
        let value = details();
        let pretty = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: Value = serde_json::from_str(&pretty).expect("json should parse");
        assert_eq!(parsed["parcel"]["total_area"], json!(150.5));
        assert_eq!(parsed["constructions"][0]["built_area"], json!(50.0));

        let raw = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!raw.contains('\n'));
    }
}
