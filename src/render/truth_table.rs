//! Truth table display
//!
//! Cell styling is a presentation rule only: a cell is styled `True` iff its
//! value is exactly the string `"T"`, `False` iff exactly `"F"`, and plain
//! otherwise. Nothing else in the crate reads truth values from cells.

use serde_json::Value;

use crate::client::{TruthRow, TruthTable};

use super::html::escape;

/// Guidance shown when the knowledge base has no statements
pub const NEED_STATEMENTS: &str = "Add at least one statement first to generate a truth table.";
/// Placeholder while the request is in flight
pub const GENERATING: &str = "Generating truth table...";
/// Generic transport failure
pub const TRANSPORT_FAILED: &str = "Failed to generate truth table from server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    True,
    False,
    Plain,
}

impl CellStyle {
    pub fn of(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("T") => CellStyle::True,
            Some("F") => CellStyle::False,
            _ => CellStyle::Plain,
        }
    }

    fn class(&self) -> &'static str {
        match self {
            CellStyle::True => "true",
            CellStyle::False => "false",
            CellStyle::Plain => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    fn from_value(value: Option<&Value>) -> Self {
        let text = match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        Self {
            text,
            style: CellStyle::of(value),
        }
    }
}

/// A table laid out in exactly the server's header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    pub fn new(table: &TruthTable) -> Self {
        let rows = table
            .rows
            .iter()
            .map(|row| Self::layout_row(&table.headers, row))
            .collect();
        Self {
            headers: table.headers.clone(),
            rows,
        }
    }

    fn layout_row(headers: &[String], row: &TruthRow) -> Vec<Cell> {
        headers.iter().map(|h| Cell::from_value(row.get(h))).collect()
    }

    pub fn to_text(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|c| c.text.chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_row(&mut out, self.headers.iter().map(String::as_str), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        out.push('\n');
        for row in &self.rows {
            push_row(&mut out, row.iter().map(|c| c.text.as_str()), &widths);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<table><thead><tr>");
        for h in &self.headers {
            html.push_str(&format!("<th>{}</th>", escape(h)));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!(
                    "<td class=\"{}\">{}</td>",
                    cell.style.class(),
                    escape(&cell.text)
                ));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(text, width)| {
            let pad = width.saturating_sub(text.chars().count());
            format!("{}{}", text, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
