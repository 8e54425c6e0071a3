//! Single-record CSV parsing and lab value reading.
//!
//! Splitting is deliberately naive: commas separate cells, no quoting, no
//! escaping. Only the header and the first data row are read.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{FieldRecord, PredictionError};

/// Parse raw CSV text (header + one data row) into a field record.
///
/// Header and value cells are zipped by position. Extra headers map to a
/// missing value, extra values are dropped.
pub fn parse_record(text: &str) -> Result<FieldRecord, PredictionError> {
    let trimmed = text.trim();
    let lines: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('\n').collect()
    };

    if lines.len() < 2 {
        return Err(PredictionError::MalformedInput { lines: lines.len() });
    }

    let headers = lines[0].split(',').map(str::trim);
    let mut values = lines[1].split(',').map(str::trim);

    let mut record = FieldRecord::new();
    for header in headers {
        record.insert(header, values.next().map(str::to_string));
    }

    tracing::debug!(fields = record.len(), "Parsed CSV record");
    Ok(record)
}

/// Leading decimal number, optional sign and exponent. An exponent without
/// digits is not part of the match.
static RE_LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
});

/// Read a lab value the way a lenient float parser does: the longest leading
/// decimal prefix counts, so `"150 mg/dL"` is 150. `None` when there is no
/// numeric prefix at all.
pub fn parse_lab_value(raw: &str) -> Option<f64> {
    RE_LEADING_NUMBER
        .find(raw.trim())?
        .as_str()
        .parse::<f64>()
        .ok()
}

/// Numeric value of a field, 0 when absent or unparseable.
pub fn numeric_or_zero(field: &str, raw: Option<&str>) -> f64 {
    match raw {
        Some(raw) => parse_lab_value(raw).unwrap_or_else(|| {
            tracing::debug!(field, value = raw, "Non-numeric lab value treated as 0");
            0.0
        }),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_row() {
        let record = parse_record("Name,Glucose,HbA1c\nJohn Doe,150,7.0").unwrap();
        assert_eq!(record.get("Name"), Some("John Doe"));
        assert_eq!(record.get("Glucose"), Some("150"));
        assert_eq!(record.get("HbA1c"), Some("7.0"));
    }

    #[test]
    fn trims_cells_and_crlf() {
        let record = parse_record("  Name , Glucose \r\n Jane , 80 \r\n").unwrap();
        assert_eq!(record.get("Name"), Some("Jane"));
        assert_eq!(record.get("Glucose"), Some("80"));
    }

    #[test]
    fn extra_headers_map_to_missing() {
        let record = parse_record("Name,Glucose,Iron\nJane,80").unwrap();
        assert!(record.contains("Iron"));
        assert_eq!(record.get("Iron"), None);
    }

    #[test]
    fn extra_values_are_dropped() {
        let record = parse_record("Name\nJane,80,90").unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("Name"), Some("Jane"));
    }

    #[test]
    fn rows_after_the_first_are_ignored() {
        let record = parse_record("Name,Glucose\nA,1\nB,2").unwrap();
        assert_eq!(record.get("Name"), Some("A"));
    }

    #[test]
    fn header_only_is_malformed() {
        assert_eq!(
            parse_record("Name,Glucose\n"),
            Err(PredictionError::MalformedInput { lines: 1 })
        );
    }

    #[test]
    fn empty_input_is_malformed() {
        assert_eq!(
            parse_record("   \n  "),
            Err(PredictionError::MalformedInput { lines: 0 })
        );
    }

    #[test]
    fn lab_value_plain_numbers() {
        assert_eq!(parse_lab_value("150"), Some(150.0));
        assert_eq!(parse_lab_value("7.0"), Some(7.0));
        assert_eq!(parse_lab_value("-3.5"), Some(-3.5));
        assert_eq!(parse_lab_value(".5"), Some(0.5));
        assert_eq!(parse_lab_value("5."), Some(5.0));
        assert_eq!(parse_lab_value("1e3"), Some(1000.0));
    }

    #[test]
    fn lab_value_reads_leading_prefix() {
        assert_eq!(parse_lab_value("150 mg/dL"), Some(150.0));
        assert_eq!(parse_lab_value("12.5g"), Some(12.5));
        assert_eq!(parse_lab_value("4e"), Some(4.0));
        assert_eq!(parse_lab_value("2e+"), Some(2.0));
        assert_eq!(parse_lab_value("+5"), Some(5.0));
        assert_eq!(parse_lab_value("3.2e-1 x"), Some(0.32));
    }

    #[test]
    fn lab_value_rejects_non_numeric() {
        assert_eq!(parse_lab_value(""), None);
        assert_eq!(parse_lab_value("abc"), None);
        assert_eq!(parse_lab_value("NaN"), None);
        assert_eq!(parse_lab_value("-"), None);
        assert_eq!(parse_lab_value("."), None);
    }

    #[test]
    fn numeric_or_zero_defaults() {
        assert_eq!(numeric_or_zero("Glucose", None), 0.0);
        assert_eq!(numeric_or_zero("Glucose", Some("high")), 0.0);
        assert_eq!(numeric_or_zero("Glucose", Some("99")), 99.0);
    }
}
