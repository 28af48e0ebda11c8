use crate::domain::models::{ColumnKind, ColumnTypeSpec, Table, is_missing};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

pub const STRING_SENTINEL: &str = "N/A";
pub const FLOAT_SENTINEL: f64 = 0.0;
pub const DATE_SENTINEL: &str = "1998-01-01";

/// Tried only when the value starts with a four-digit year.
const YEAR_FIRST_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const YEAR_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Year last, four digits.
const YEAR_LAST_FORMATS: &[&str] = &[
    "%m/%d/%Y", "%m-%d-%Y", "%d %b %Y", "%b %d, %Y", "%B %d, %Y", "%d-%b-%Y",
];

/// Year last, two digits: 00-69 map to 20xx, 70-99 to 19xx.
const SHORT_YEAR_FORMATS: &[&str] = &[
    "%m/%d/%y", "%m-%d-%y", "%d %b %y", "%b %d, %y", "%B %d, %y", "%d-%b-%y",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReport {
    pub column: String,
    pub kind: ColumnKind,
    /// Missing cells replaced by the sentinel.
    pub filled: usize,
    /// Present but unparseable cells replaced by the sentinel.
    pub coerced: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub columns: Vec<ColumnReport>,
    pub skipped_columns: Vec<String>,
}

impl NormalizeReport {
    pub fn total_filled(&self) -> usize {
        self.columns.iter().map(|c| c.filled).sum()
    }

    pub fn total_coerced(&self) -> usize {
        self.columns.iter().map(|c| c.coerced).sum()
    }
}

pub fn parse_float(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn format_float(value: f64) -> String {
    format!("{:.1}", value)
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn trailing_digits(s: &str) -> usize {
    s.bytes().rev().take_while(u8::is_ascii_digit).count()
}

fn parse_with(trimmed: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Parses a calendar date. Dates outside years 0..=9999 are rejected so the
/// rendered value is always `YYYY-MM-DD`.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    let date = if trimmed.len() == 8 && leading_digits(trimmed) == 8 {
        let year = trimmed[0..4].parse().ok()?;
        let month = trimmed[4..6].parse().ok()?;
        let day = trimmed[6..8].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    } else if leading_digits(trimmed) == 4 {
        parse_with(trimmed, YEAR_FIRST_FORMATS)
            .or_else(|| {
                YEAR_FIRST_DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                    .map(|dt| dt.date())
            })
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    } else {
        match trailing_digits(trimmed) {
            4 => parse_with(trimmed, YEAR_LAST_FORMATS),
            2 => parse_with(trimmed, SHORT_YEAR_FORMATS),
            _ => None,
        }
    };
    date.filter(|d| (0..=9999).contains(&d.year()))
}

fn normalize_cell(kind: ColumnKind, cell: &str, report: &mut ColumnReport) -> String {
    let missing = is_missing(cell);
    match kind {
        ColumnKind::String => {
            if missing {
                if cell != STRING_SENTINEL {
                    report.filled += 1;
                }
                STRING_SENTINEL.to_string()
            } else {
                cell.to_string()
            }
        }
        ColumnKind::Float => {
            let value = if missing {
                report.filled += 1;
                FLOAT_SENTINEL
            } else {
                parse_float(cell).unwrap_or_else(|| {
                    report.coerced += 1;
                    FLOAT_SENTINEL
                })
            };
            format_float(value)
        }
        ColumnKind::Date => {
            if missing {
                report.filled += 1;
                return DATE_SENTINEL.to_string();
            }
            match parse_date(cell) {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => {
                    report.coerced += 1;
                    DATE_SENTINEL.to_string()
                }
            }
        }
    }
}

/// Normalizes every column named in `spec`. Columns absent from the table are
/// skipped; repeated column names are all normalized.
pub fn normalize_types(table: &mut Table, spec: &ColumnTypeSpec) -> NormalizeReport {
    let mut report = NormalizeReport::default();
    for (column, kind) in spec.iter() {
        let indices = table.column_indices(column);
        if indices.is_empty() {
            warn!("Column '{}' ({}) not found in table, skipping", column, kind);
            report.skipped_columns.push(column.to_string());
            continue;
        }
        let mut column_report = ColumnReport {
            column: column.to_string(),
            kind,
            filled: 0,
            coerced: 0,
        };
        for idx in indices {
            table.map_column(idx, |cell| normalize_cell(kind, cell, &mut column_report));
        }
        debug!(
            "Normalized column '{}' as {}: {} filled, {} coerced",
            column, kind, column_report.filled, column_report.coerced
        );
        report.columns.push(column_report);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_one_decimal(s: &str) -> bool {
        let body = s.strip_prefix('-').unwrap_or(s);
        match body.split_once('.') {
            Some((int, frac)) => {
                !int.is_empty()
                    && int.bytes().all(|b| b.is_ascii_digit())
                    && frac.len() == 1
                    && frac.bytes().all(|b| b.is_ascii_digit())
            }
            None => false,
        }
    }

    fn is_iso_date(s: &str) -> bool {
        s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
    }

    fn dividends_table() -> Table {
        let headers = ["symbol", "shortname", "dividendrate", "payoutdate", "untyped"];
        let rows = [
            ["AAPL", "Apple", "0.96", "2024-02-15", ""],
            ["", "NaN", "abc", "not-a-date", "x"],
            ["KO", "", "", "", "y"],
            ["T", "AT&T", "-0.04", "03/01/2024", "z"],
            ["PEP", "PepsiCo", "1e1", "2024-06-28 00:00:00", ""],
        ];
        Table::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn dividends_spec() -> ColumnTypeSpec {
        ColumnTypeSpec::new()
            .with("symbol", ColumnKind::String)
            .with("shortname", ColumnKind::String)
            .with("dividendrate", ColumnKind::Float)
            .with("payoutdate", ColumnKind::Date)
    }

    #[test]
    fn normalizes_each_kind() {
        let mut table = dividends_table();
        normalize_types(&mut table, &dividends_spec());
        let col = |name: &str| -> Vec<String> {
            let idx = table.column_index(name).unwrap();
            table.rows().iter().map(|r| r[idx].clone()).collect()
        };
        assert_eq!(col("symbol"), ["AAPL", "N/A", "KO", "T", "PEP"]);
        assert_eq!(col("shortname"), ["Apple", "N/A", "N/A", "AT&T", "PepsiCo"]);
        assert_eq!(col("dividendrate"), ["1.0", "0.0", "0.0", "-0.0", "10.0"]);
        assert_eq!(
            col("payoutdate"),
            ["2024-02-15", "1998-01-01", "1998-01-01", "2024-03-01", "2024-06-28"]
        );
        assert_eq!(col("untyped"), ["", "x", "y", "z", ""]);
    }

    #[test]
    fn typed_cells_satisfy_formats() {
        let mut table = dividends_table();
        normalize_types(&mut table, &dividends_spec());
        let rate = table.column_index("dividendrate").unwrap();
        let date = table.column_index("payoutdate").unwrap();
        let shortname = table.column_index("shortname").unwrap();
        for row in table.rows() {
            assert!(is_one_decimal(&row[rate]), "bad float {}", row[rate]);
            assert!(is_iso_date(&row[date]), "bad date {}", row[date]);
            assert!(!row[shortname].is_empty());
        }
    }

    #[test]
    fn reports_fills_and_coercions() {
        let mut table = dividends_table();
        let report = normalize_types(&mut table, &dividends_spec());
        let by_name = |name: &str| {
            report
                .columns
                .iter()
                .find(|c| c.column == name)
                .cloned()
                .unwrap()
        };
        assert_eq!(by_name("dividendrate").filled, 1);
        assert_eq!(by_name("dividendrate").coerced, 1);
        assert_eq!(by_name("payoutdate").filled, 1);
        assert_eq!(by_name("payoutdate").coerced, 1);
        assert_eq!(by_name("shortname").filled, 2);
        assert_eq!(report.total_coerced(), 2);
    }

    #[test]
    fn absent_columns_are_skipped() {
        let mut table = dividends_table();
        let spec = ColumnTypeSpec::new().with("earningsdate", ColumnKind::Date);
        let before = table.clone();
        let report = normalize_types(&mut table, &spec);
        assert_eq!(report.skipped_columns, vec!["earningsdate"]);
        assert_eq!(table, before);
    }

    #[test]
    fn spec_examples() {
        assert_eq!(parse_float("abc"), None);
        assert_eq!(format_float(parse_float("abc").unwrap_or(FLOAT_SENTINEL)), "0.0");
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_float("inf"), None);
        assert_eq!(format_float(3.96), "4.0");
    }

    #[test]
    fn date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        for input in [
            "2024-03-01",
            "2024/03/01",
            "20240301",
            "03/01/2024",
            "3/1/24",
            "03-01-24",
            "1 Mar 2024",
            "Mar 01, 2024",
            "March 1, 2024",
            "2024-03-01T09:30:00.250",
            "2024-03-01T23:00:00-05:00",
        ] {
            assert_eq!(parse_date(input), Some(expected), "input {}", input);
        }
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn short_years_read_month_first() {
        let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
        assert_eq!(parse_date("1/2/24"), ymd(2024, 1, 2));
        assert_eq!(parse_date("12/11/10"), ymd(2010, 12, 11));
        assert_eq!(parse_date("01-02-24"), ymd(2024, 1, 2));
        assert_eq!(parse_date("7/4/99"), ymd(1999, 7, 4));
        for input in ["1/2/24", "12/11/10", "01-02-24", "1/2/3", "24/1/2"] {
            if let Some(date) = parse_date(input) {
                assert!(date.year() >= 1970, "input {} parsed as {}", input, date);
            }
        }
    }

    #[test]
    fn out_of_range_years_become_sentinel() {
        let headers = vec!["payoutdate".to_string()];
        let rows = ["-0005-01-01", "+12345-01-01", "0999-12-31"]
            .iter()
            .map(|s| vec![s.to_string()])
            .collect();
        let mut table = Table::new(headers, rows).unwrap();
        let spec = ColumnTypeSpec::new().with("payoutdate", ColumnKind::Date);
        let report = normalize_types(&mut table, &spec);
        let cells: Vec<&str> = table.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(cells, [DATE_SENTINEL, DATE_SENTINEL, "0999-12-31"]);
        assert!(cells.iter().all(|c| is_iso_date(c)));
        assert_eq!(report.total_coerced(), 2);
    }
}
