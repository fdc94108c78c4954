//! Fixed-width table layout shared by the text and PDF formatters.
//!
//! `DisplayTable` is the presentation-ready form of a [`Table`]: every cell
//! is already a string and every column knows its display width. Formatters
//! only ask it for lines; no data inspection happens past this point.
//!
//! Layout for columns `a, b`:
//!
//! ```text
//! +-------+
//! | a | b |
//! +-------+
//! | 1 | 2 |
//! +-------+
//! ```

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::data::{Record, Table};
use crate::options::Alignment;

/// Column headers and cells as display strings, with column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub widths: Vec<usize>,
}

impl DisplayTable {
    /// Stringify a table and measure its columns.
    pub fn from_table(table: &Table) -> Self {
        let headers = table.column_names().to_vec();
        let rows: Vec<Vec<String>> = table.rows().iter().map(Record::to_strings).collect();
        let widths = measure(&headers, &rows);
        DisplayTable {
            headers,
            rows,
            widths,
        }
    }

    /// A single headerless row.
    pub fn from_record(record: &Record) -> Self {
        let rows = vec![record.to_strings()];
        let widths = measure(&[], &rows);
        DisplayTable {
            headers: Vec::new(),
            rows,
            widths,
        }
    }

    pub fn has_columns(&self) -> bool {
        !self.widths.is_empty()
    }

    /// Horizontal border: `+`, dashes spanning every cell, `+`.
    pub fn rule(&self) -> String {
        let inner = (self.widths.iter().sum::<usize>() + self.widths.len() * 3).saturating_sub(1);
        format!("+{}+", "-".repeat(inner))
    }

    /// Column names, each centered in its column.
    pub fn header_line(&self) -> String {
        self.line(&self.headers, Alignment::Center)
    }

    pub fn row_line(&self, cells: &[String], alignment: Alignment) -> String {
        self.line(cells, alignment)
    }

    fn line(&self, cells: &[String], alignment: Alignment) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, &width)| pad(cell, width, alignment))
            .collect();
        format!("| {} |", padded.join(" | "))
    }

    /// Border and header lines (header omitted when `show_headers` is off).
    pub fn header_lines(&self, show_headers: bool) -> Vec<String> {
        if !self.has_columns() || !show_headers {
            return Vec::new();
        }
        vec![self.rule(), self.header_line()]
    }

    /// Border, one line per row, border.
    pub fn body_lines(&self, alignment: Alignment) -> Vec<String> {
        if !self.has_columns() {
            return vec![EMPTY_TABLE_MESSAGE.to_string()];
        }
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.rule());
        lines.extend(self.rows.iter().map(|row| self.row_line(row, alignment)));
        lines.push(self.rule());
        lines
    }
}

/// Printed in place of a table that has no columns.
pub const EMPTY_TABLE_MESSAGE: &str = "This table has no columns";

fn measure(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let count = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    (0..count)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .chain(headers.get(i))
                .map(|s| s.width())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Pad `text` to `width` display columns.
pub fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let fill = width.saturating_sub(text.width());
    match alignment {
        Alignment::Left => format!("{}{}", text, " ".repeat(fill)),
        Alignment::Right => format!("{}{}", " ".repeat(fill), text),
        Alignment::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
    }
}

/// Truncate a line wider than `max_width`, marking the cut with `>>`.
pub fn fit_to_width(line: &str, max_width: usize) -> String {
    if line.width() <= max_width || max_width < 2 {
        return line.to_string();
    }
    let limit = max_width - 2;
    let mut result = String::new();
    let mut current = 0;
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > limit {
            break;
        }
        result.push(c);
        current += w;
    }
    result.push_str(">>");
    result
}
