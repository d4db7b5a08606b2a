//! File inputs: option chains, price histories and saved rate quotes.
//!
//! CSV files have a header row; surrounding whitespace is trimmed and an
//! empty price cell means "no quote".

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::{CliError, Result};

/// One strike of a single-expiry option chain (`strike,call,put`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChainRow {
    /// Strike price
    pub strike: f64,
    /// Last call price, if quoted
    pub call: Option<f64>,
    /// Last put price, if quoted
    pub put: Option<f64>,
}

/// One strike of a multi-expiry chain (`expiry,strike,call,put`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TermRow {
    /// Expiry date (ISO 8601)
    pub expiry: NaiveDate,
    /// Strike price
    pub strike: f64,
    /// Last call price, if quoted
    pub call: Option<f64>,
    /// Last put price, if quoted
    pub put: Option<f64>,
}

/// One daily close (`date,close`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HistoryRow {
    /// Trading date (ISO 8601)
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

/// Parse CSV rows from `reader`; `source` names the input in errors.
pub fn read_csv<T, R>(reader: R, source: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let rows = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|source_err| CliError::Csv {
            path: source.to_string(),
            source: source_err,
        })?;
    if rows.is_empty() {
        return Err(CliError::InvalidInput {
            path: source.to_string(),
            message: "no data rows".to_string(),
        });
    }
    debug!(source, rows = rows.len(), "CSV loaded");
    Ok(rows)
}

fn open(path: &Path) -> Result<std::fs::File> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::File::open(path)?)
}

/// Load a single-expiry option chain.
pub fn load_chain(path: &Path) -> Result<Vec<ChainRow>> {
    read_csv(open(path)?, &path.display().to_string())
}

/// Load a multi-expiry option chain.
pub fn load_term_chain(path: &Path) -> Result<Vec<TermRow>> {
    read_csv(open(path)?, &path.display().to_string())
}

/// Load a price history, sorted oldest first.
pub fn load_history(path: &Path) -> Result<Vec<HistoryRow>> {
    let mut rows: Vec<HistoryRow> = read_csv(open(path)?, &path.display().to_string())?;
    rows.sort_by_key(|row| row.date);
    Ok(rows)
}

/// CSS class of the element holding the last price on a saved quote page.
pub const QUOTE_MARKER: &str = "QuoteStrip-lastPrice";

/// Extract a percentage quote and convert it to a decimal rate rounded to
/// 6 places.
///
/// Reads the text of the first element whose class list contains exactly
/// [`QUOTE_MARKER`]; classes that merely start with it, such as
/// `QuoteStrip-lastPriceStripContainer`, are skipped. A document without the
/// marker is parsed as a bare percentage such as `4.52%`.
pub fn extract_quote_rate(text: &str) -> Option<f64> {
    if !text.contains(QUOTE_MARKER) {
        return parse_percentage(text);
    }
    let raw = text
        .match_indices(QUOTE_MARKER)
        .filter(|&(start, _)| is_class_token(text, start, start + QUOTE_MARKER.len()))
        .find_map(|(start, _)| {
            let rest = &text[start..];
            let rest = &rest[rest.find('>')? + 1..];
            Some(&rest[..rest.find('<')?])
        })?;
    parse_percentage(raw)
}

/// Whether `text[start..end]` is a whole token of a class attribute value.
fn is_class_token(text: &str, start: usize, end: usize) -> bool {
    let bounded = |c: Option<char>| matches!(c, Some('"' | '\'' | ' ' | '\t' | '\n'));
    bounded(text[..start].chars().next_back()) && bounded(text[end..].chars().next())
}

fn parse_percentage(raw: &str) -> Option<f64> {
    let percent: f64 = raw.trim().trim_end_matches('%').trim().parse().ok()?;
    if !percent.is_finite() {
        return None;
    }
    Some((percent / 100.0 * 1e6).round() / 1e6)
}

/// Load a saved quote page and extract its rate.
pub fn load_quote_rate(path: &Path) -> Result<f64> {
    let mut text = String::new();
    open(path)?.read_to_string(&mut text)?;
    extract_quote_rate(&text).ok_or_else(|| CliError::InvalidInput {
        path: path.display().to_string(),
        message: format!("no percentage quote found (looked for '{}')", QUOTE_MARKER),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_with_missing_quotes() {
        let data = "strike,call,put\n95,7.10,1.85\n100, 4.20 ,\n105,,5.60\n";
        let rows: Vec<ChainRow> = read_csv(data.as_bytes(), "chain").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1],
            ChainRow {
                strike: 100.0,
                call: Some(4.2),
                put: None
            }
        );
        assert_eq!(rows[2].call, None);
        assert_eq!(rows[2].put, Some(5.6));
    }

    #[test]
    fn test_term_chain_dates() {
        let data = "expiry,strike,call,put\n2024-06-21,100,4.2,3.1\n";
        let rows: Vec<TermRow> = read_csv(data.as_bytes(), "term").unwrap();
        assert_eq!(rows[0].expiry, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap());
    }

    #[test]
    fn test_malformed_csv_names_source() {
        let data = "strike,call,put\nabc,1,2\n";
        match read_csv::<ChainRow, _>(data.as_bytes(), "bad.csv") {
            Err(CliError::Csv { path, .. }) => assert_eq!(path, "bad.csv"),
            other => panic!("Expected Csv error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_csv_is_invalid() {
        let data = "date,close\n";
        assert!(matches!(
            read_csv::<HistoryRow, _>(data.as_bytes(), "empty.csv"),
            Err(CliError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_chain(Path::new("/nonexistent/chain.csv")),
            Err(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_extract_quote_rate_from_page() {
        let page = r#"<div><span class="QuoteStrip-lastPrice">4.52%</span></div>"#;
        assert_eq!(extract_quote_rate(page), Some(0.0452));
    }

    #[test]
    fn test_extract_quote_rate_skips_container_class() {
        let page = r#"<div class="QuoteStrip-lastPriceStripContainer">
            <span class="QuoteStrip-lastPrice">4.567%</span>
        </div>"#;
        assert_eq!(extract_quote_rate(page), Some(0.04567));
    }

    #[test]
    fn test_extract_quote_rate_class_list() {
        let page = r#"<span class='price QuoteStrip-lastPrice up'>3.9%</span>"#;
        assert_eq!(extract_quote_rate(page), Some(0.039));
    }

    #[test]
    fn test_extract_quote_rate_bare_percentage() {
        assert_eq!(extract_quote_rate(" 5.125% \n"), Some(0.05125));
        assert_eq!(extract_quote_rate("3"), Some(0.03));
    }

    #[test]
    fn test_extract_quote_rate_rounds_to_six_places() {
        assert_eq!(extract_quote_rate("4.1234567%"), Some(0.041235));
    }

    #[test]
    fn test_extract_quote_rate_missing() {
        assert_eq!(extract_quote_rate("<html>no quote here</html>"), None);
        assert_eq!(
            extract_quote_rate(r#"<span class="QuoteStrip-lastPrice">--</span>"#),
            None
        );
    }
}
