//! Aligned plain-text tables.
//!
//! Widths are counted in characters so `m²` units and accented subdivision
//! names line up. A column is right-aligned only when every filled cell in it
//! parses as a number, which keeps dates, CPFs and IPTU numbers left-aligned.

use lotes_core::cpf::ANONYMIZED_CPF;

/// Printed for missing values.
pub const EMPTY_CELL: &str = "-";

const MIN_WIDTH: usize = 6;
const GAP: &str = "  ";

const GREEN: &str = "32";
const YELLOW: &str = "33";
const RED: &str = "31";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions<'a> {
    pub max_width: Option<usize>,
    pub color: bool,
    /// Stored in place of a CPF after anonymization; highlighted when `color` is on.
    pub anonymized: &'a str,
}

impl Default for TableOptions<'_> {
    fn default() -> Self {
        Self {
            max_width: None,
            color: false,
            anonymized: ANONYMIZED_CPF,
        }
    }
}

#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions<'_>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .max()
                .unwrap_or(0)
                .max(min_width(header))
        })
        .collect();
    fit_widths(&mut widths, headers, options.max_width);

    let numeric: Vec<bool> = (0..headers.len())
        .map(|index| is_numeric_column(rows, index))
        .collect();

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(index, header)| pad(&truncate_text(header, widths[index]), widths[index], numeric[index]))
        .collect::<Vec<_>>()
        .join(GAP);
    let divider = "-".repeat(display_width(&header_line));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or(EMPTY_CELL, String::as_str);
                let text = truncate_text(value, *width);
                let padded = pad(&text, *width, numeric[index]);
                match color_code(&text, options) {
                    Some(code) => format!("\u{1b}[{code}m{padded}\u{1b}[0m"),
                    None => padded,
                }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line);
    }
    lines.join("\n")
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn min_width(header: &str) -> usize {
    display_width(header).max(MIN_WIDTH)
}

/// Shrink the widest shrinkable column one character at a time until the
/// table fits, never below a column's header width.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * GAP.len();
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > min_width(headers[*index]))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if display_width(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn is_numeric_column(rows: &[Vec<String>], index: usize) -> bool {
    let mut filled = rows
        .iter()
        .filter_map(|row| row.get(index))
        .filter(|cell| cell.as_str() != EMPTY_CELL)
        .peekable();
    filled.peek().is_some()
        && filled.all(|cell| cell.parse::<f64>().is_ok_and(f64::is_finite))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Green for granted flags and admins, yellow for anonymized or missing
/// values, red for refusals.
fn color_code(text: &str, options: TableOptions<'_>) -> Option<&'static str> {
    if !options.color {
        return None;
    }
    if text == options.anonymized {
        return Some(YELLOW);
    }
    match text {
        "true" | "admin" | "allow" => Some(GREEN),
        EMPTY_CELL => Some(YELLOW),
        "false" | "redirect_to_auth" | "redirect_to_dashboard" => Some(RED),
        _ => None,
    }
}
