//! Result rendering as a text table, JSON or CSV.
//!
//! Every command produces a [`Report`]; the global `--format` flag picks the
//! rendering. A [`Cell::Missing`] value (no quote, or no convergence) is shown
//! as `n/a` in tables, `null` in JSON and an empty field in CSV.

use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::{CliError, Result};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text table for terminals
    #[default]
    Table,
    /// JSON array of row objects
    Json,
    /// CSV with a header row
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        })
    }
}

/// One value in a report row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Number shown with a fixed number of decimals
    Number {
        /// The value
        value: f64,
        /// Decimals in table and CSV output
        precision: usize,
    },
    /// Free text, such as a date
    Text(String),
    /// No value
    Missing,
}

impl Cell {
    /// Number cell.
    pub fn num(value: f64, precision: usize) -> Self {
        Cell::Number { value, precision }
    }

    /// Number cell, or [`Cell::Missing`] for `None`.
    pub fn opt(value: Option<f64>, precision: usize) -> Self {
        value.map_or(Cell::Missing, |v| Cell::num(v, precision))
    }

    /// Text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn plain(&self) -> String {
        match self {
            Cell::Number { value, precision } => format!("{:.*}", precision, value),
            Cell::Text(s) => s.clone(),
            Cell::Missing => String::new(),
        }
    }

    fn for_table(&self) -> String {
        match self {
            Cell::Missing => "n/a".to_string(),
            other => other.plain(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Cell::Number { value, .. } => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Cell::Text(s) => Value::String(s.clone()),
            Cell::Missing => Value::Null,
        }
    }
}

/// Tabular command result with optional title and footnotes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    title: Option<String>,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
    notes: Vec<String>,
}

impl Report {
    /// Empty report with the given column names.
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            ..Default::default()
        }
    }

    /// Set the title shown above the table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a row; it must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Append a footnote. Footnotes appear in table output only.
    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Footnotes in insertion order.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Cell at `row` in the column named `column`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)
    }

    /// Render in the given format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.render_table()),
            OutputFormat::Json => self.render_json(),
            OutputFormat::Csv => self.render_csv(),
        }
    }

    fn render_table(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(Cell::for_table).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), right)
        };

        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(title);
            out.push('\n');
        }
        out.push_str(&rule("┌", "┬", "┐"));
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(name, w)| format!(" {:<w$} ", name, w = w))
            .collect();
        out.push_str(&format!("│{}│\n", header.join("│")));
        out.push_str(&rule("├", "┼", "┤"));
        for (row, raw) in cells.iter().zip(&self.rows) {
            let line: Vec<String> = row
                .iter()
                .zip(raw)
                .zip(&widths)
                .map(|((text, cell), w)| match cell {
                    Cell::Text(_) => format!(" {:<w$} ", text, w = w),
                    _ => format!(" {:>w$} ", text, w = w),
                })
                .collect();
            out.push_str(&format!("│{}│\n", line.join("│")));
        }
        out.push_str(&rule("└", "┴", "┘"));
        for note in &self.notes {
            out.push_str(&format!("* {}\n", note));
        }
        out
    }

    fn render_json(&self) -> Result<String> {
        let rows: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(name, cell)| (name.clone(), cell.to_json()))
                    .collect();
                Value::Object(object)
            })
            .collect();
        let mut text = serde_json::to_string_pretty(&Value::Array(rows))
            .map_err(|e| CliError::Output(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }

    fn render_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let to_output = |e: csv::Error| CliError::Output(e.to_string());
        writer.write_record(&self.columns).map_err(to_output)?;
        for row in &self.rows {
            writer
                .write_record(row.iter().map(Cell::plain))
                .map_err(to_output)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CliError::Output(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CliError::Output(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        let mut report = Report::new(&["strike", "call_iv", "put_iv"]).with_title("Implied volatility");
        report.push_row(vec![Cell::num(100.0, 2), Cell::num(0.2001, 4), Cell::Missing]);
        report.push_row(vec![Cell::num(105.0, 2), Cell::opt(Some(0.19), 4), Cell::opt(None, 4)]);
        report.add_note("2 put legs did not converge");
        report
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(ConfigError::InvalidFormat(_))
        ));
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_table_shows_missing_as_na() {
        let text = sample().render(OutputFormat::Table).unwrap();
        assert!(text.starts_with("Implied volatility\n┌"));
        assert!(text.contains("0.2001"));
        assert!(text.contains("n/a"));
        assert!(text.contains("* 2 put legs did not converge"));
        let widths: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with('│'))
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_json_uses_null_for_missing() {
        let text = sample().render(OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["call_iv"], Value::from(0.2001));
        assert_eq!(rows[0]["put_iv"], Value::Null);
    }

    #[test]
    fn test_csv_leaves_missing_empty() {
        let text = sample().render(OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "strike,call_iv,put_iv");
        assert_eq!(lines[1], "100.00,0.2001,");
        assert_eq!(lines[2], "105.00,0.1900,");
    }

    #[test]
    fn test_cell_lookup() {
        let report = sample();
        assert_eq!(report.cell(1, "call_iv"), Some(&Cell::num(0.19, 4)));
        assert_eq!(report.cell(0, "vega"), None);
        assert_eq!(report.cell(5, "strike"), None);
    }

    #[test]
    fn test_non_finite_number_is_json_null() {
        assert_eq!(Cell::num(f64::NAN, 2).to_json(), Value::Null);
    }
}
