//! Delimited-file reader producing a [`Series`].
//!
//! Each non-blank line is one row. A row contributes a value from the data
//! column and, when a time column is configured, a label from it; otherwise
//! rows are labelled with a 1-based counter over accepted rows. Rows that lack
//! a required column or whose value does not parse are dropped as a whole,
//! so a header line is skipped naturally.
//!
//! Fields may be double-quoted as in RFC 4180: a quoted field can contain the
//! delimiter, and `""` inside it stands for one quote. A quoted field must end
//! on the same line. Rows that are not valid UTF-8 are dropped like any other
//! malformed row.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    num::NonZeroUsize,
    path::Path,
};

use anyhow::Context;
use meanshift_detect::Series;
use tracing::{info, warn};

/// Which columns (1-based) hold the data and the optional timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnLayout {
    pub(crate) delimiter: char,
    pub(crate) time_col: Option<NonZeroUsize>,
    pub(crate) data_col: NonZeroUsize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            delimiter: ',',
            time_col: None,
            data_col: NonZeroUsize::MIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
enum RowError {
    #[display("missing column {column}")]
    MissingColumn { column: usize },
    #[display("invalid value {value:?}")]
    InvalidValue { value: String },
    #[display("unterminated quoted field")]
    UnterminatedQuote,
    #[display("unexpected text after quoted field")]
    TextAfterQuote,
    #[display("row is not valid UTF-8")]
    InvalidUtf8,
}

pub(crate) fn read_series(path: &Path, layout: &ColumnLayout) -> anyhow::Result<Series> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open data file: {}", path.display()))?;
    parse_series(BufReader::new(file), layout)
        .with_context(|| format!("Failed to read data file: {}", path.display()))
}

pub(crate) fn parse_series<R>(mut reader: R, layout: &ColumnLayout) -> anyhow::Result<Series>
where
    R: BufRead,
{
    let mut values = Vec::new();
    let mut labels = Vec::new();
    let mut skipped = 0_usize;
    let mut buf = Vec::new();
    let mut line_number = 0_usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => parse_row(line, layout, values.len() + 1),
            Err(_) => Err(RowError::InvalidUtf8),
        };
        match parsed {
            Ok((value, label)) => {
                values.push(value);
                labels.push(label);
            }
            Err(reason) => {
                skipped += 1;
                warn!(line = line_number, %reason, "skipping malformed row");
            }
        }
    }

    info!(rows = values.len(), skipped, "loaded series");
    Ok(Series::new(values, labels)?)
}

/// Parses one row into its value and label. Nothing is kept on error.
fn parse_row(
    line: &str,
    layout: &ColumnLayout,
    row_number: usize,
) -> Result<(f64, String), RowError> {
    let fields = split_fields(line, layout.delimiter)?;
    let field = |column: NonZeroUsize| {
        fields
            .get(column.get() - 1)
            .map(String::as_str)
            .ok_or(RowError::MissingColumn {
                column: column.get(),
            })
    };

    let raw = field(layout.data_col)?;
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowError::InvalidValue {
            value: raw.to_owned(),
        })?;

    let label = match layout.time_col {
        Some(column) => field(column)?.to_owned(),
        None => row_number.to_string(),
    };
    Ok((value, label))
}

/// Splits a row on `delimiter`, trimming whitespace around each field and
/// unquoting double-quoted fields.
fn split_fields(line: &str, delimiter: char) -> Result<Vec<String>, RowError> {
    let is_padding = |c: &char| *c != delimiter && c.is_whitespace();
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(is_padding).is_some() {}

        let mut field = String::new();
        if chars.next_if_eq(&'"').is_some() {
            loop {
                match chars.next() {
                    Some('"') if chars.next_if_eq(&'"').is_some() => field.push('"'),
                    Some('"') => break,
                    Some(c) => field.push(c),
                    None => return Err(RowError::UnterminatedQuote),
                }
            }
            while chars.next_if(is_padding).is_some() {}
            if chars.peek().is_some_and(|c| *c != delimiter) {
                return Err(RowError::TextAfterQuote);
            }
        } else {
            while let Some(c) = chars.next_if(|c| *c != delimiter) {
                field.push(c);
            }
            field.truncate(field.trim_end().len());
        }
        fields.push(field);

        // consumes the delimiter, if any
        if chars.next().is_none() {
            break;
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_single_column_with_counter_labels() {
        let input = "1.5\n2.5\n\n3.5\n";
        let series = parse_series(input.as_bytes(), &ColumnLayout::default()).unwrap();
        assert_eq!(series.values(), [1.5, 2.5, 3.5]);
        assert_eq!(series.labels(), ["1", "2", "3"]);
    }

    #[test]
    fn test_time_and_data_columns() {
        let layout = ColumnLayout {
            delimiter: ';',
            time_col: Some(col(1)),
            data_col: col(3),
        };
        let input = "time;name;value\n08:00; a ; 10\n08:05;b;12.5\r\n";
        let series = parse_series(input.as_bytes(), &layout).unwrap();
        assert_eq!(series.values(), [10.0, 12.5]);
        assert_eq!(series.labels(), ["08:00", "08:05"]);
    }

    #[test]
    fn test_quoted_fields() {
        let layout = ColumnLayout {
            time_col: Some(col(1)),
            data_col: col(2),
            ..ColumnLayout::default()
        };
        let input = "\"time\",\"value\"\n\"2024-01-01 08:00\",\"5.0\"\n\"2024-01-01 08:05\",\"6.0\"\r\n";
        let series = parse_series(input.as_bytes(), &layout).unwrap();
        assert_eq!(series.values(), [5.0, 6.0]);
        assert_eq!(series.labels(), ["2024-01-01 08:00", "2024-01-01 08:05"]);
    }

    #[test]
    fn test_quoted_field_with_delimiter_and_escaped_quote() {
        let layout = ColumnLayout {
            time_col: Some(col(1)),
            data_col: col(2),
            ..ColumnLayout::default()
        };
        let input = "\"Jan 1, \"\"am\"\"\", 7\n \"Jan 2\" ,\"8\"\n";
        let series = parse_series(input.as_bytes(), &layout).unwrap();
        assert_eq!(series.values(), [7.0, 8.0]);
        assert_eq!(series.labels(), ["Jan 1, \"am\"", "Jan 2"]);
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("a, b ,", ',').unwrap(), ["a", "b", ""]);
        assert_eq!(split_fields("\"\"\tx", '\t').unwrap(), ["", "x"]);
        assert_eq!(
            split_fields("\"open,1", ','),
            Err(RowError::UnterminatedQuote)
        );
        assert_eq!(
            split_fields("\"a\"b,1", ','),
            Err(RowError::TextAfterQuote)
        );
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped() {
        let input: &[u8] = b"1.0\ntemp\xe9rature\n2.0\n3.0\n";
        let series = parse_series(input, &ColumnLayout::default()).unwrap();
        assert_eq!(series.values(), [1.0, 2.0, 3.0]);
        assert_eq!(series.labels(), ["1", "2", "3"]);
    }

    #[test]
    fn test_malformed_rows_are_rolled_back() {
        let layout = ColumnLayout {
            time_col: Some(col(2)),
            ..ColumnLayout::default()
        };
        // bad value, missing time column, non-finite value
        let input = "1,t1\nx,t2\n2\n3,t3\nNaN,t4\ninf,t5\n4,t6\n";
        let series = parse_series(input.as_bytes(), &layout).unwrap();
        assert_eq!(series.values(), [1.0, 3.0, 4.0]);
        assert_eq!(series.labels(), ["t1", "t3", "t6"]);
    }

    #[test]
    fn test_counter_does_not_advance_on_bad_rows() {
        let input = "value\n5\nbad\n6\n";
        let series = parse_series(input.as_bytes(), &ColumnLayout::default()).unwrap();
        assert_eq!(series.values(), [5.0, 6.0]);
        assert_eq!(series.labels(), ["1", "2"]);
    }

    #[test]
    fn test_row_errors() {
        let layout = ColumnLayout {
            data_col: col(3),
            ..ColumnLayout::default()
        };
        assert_eq!(
            parse_row("1,2", &layout, 1),
            Err(RowError::MissingColumn { column: 3 })
        );
        assert_eq!(
            parse_row("1,2,abc", &layout, 1),
            Err(RowError::InvalidValue {
                value: "abc".to_owned()
            })
        );
        assert_eq!(
            RowError::MissingColumn { column: 3 }.to_string(),
            "missing column 3"
        );
    }

    #[test]
    fn test_empty_input() {
        let series = parse_series("".as_bytes(), &ColumnLayout::default()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = read_series(Path::new("/nonexistent/data.csv"), &ColumnLayout::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open data file"));
    }
}
