//! Cell value representation.
//!
//! Provides the [`CellValue`] enum which represents the typed value of a
//! single cell in a worksheet. This is the high-level counterpart to the
//! raw XML `Cell` element from `sheetforge-xml`.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// The epoch the spreadsheet serial-day convention is anchored to. Using
/// 1899-12-30 (rather than the nominal 1900-01-01 epoch) folds in both the
/// historical one-day bias and the phantom 1900-02-29 leap day Lotus 1-2-3
/// introduced and Excel kept for compatibility, so no separate "+2" term is
/// needed in the day-count arithmetic below. Only valid for dates on/after
/// 1900-03-01; see the design notes for the acknowledged gap before that.
fn serial_day_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("1899-12-30 is a valid calendar date")
}

/// Represents the value of a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No value (empty cell).
    Empty,
    /// Boolean value.
    Bool(bool),
    /// Numeric value (integers are stored as f64 in Excel).
    Number(f64),
    /// String value.
    String(String),
    /// An absolute instant, stored on write as a spreadsheet serial day.
    Date(DateTime<Utc>),
    /// Formula with optional cached result.
    Formula {
        expr: String,
        result: Option<Box<CellValue>>,
    },
    /// Error value (e.g. #DIV/0!, #N/A, #VALUE!).
    Error(String),
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Empty
    }
}

impl CellValue {
    /// Convert a date-like value to its spreadsheet serial-day number
    /// (days since 1899-12-30, i.e. the 1900 epoch plus the leap-year
    /// anomaly offset described in the module docs).
    pub fn serial_day(date: &DateTime<Utc>) -> f64 {
        let days = date
            .date_naive()
            .signed_duration_since(serial_day_epoch())
            .num_days() as f64;
        let frac = (date.num_seconds_from_midnight() as f64) / 86_400.0;
        days + frac
    }

    /// Render the textual form of the value used to populate the
    /// shared-strings table, matching spec §4.5's per-kind conversion rules.
    pub fn to_shared_string_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Formula { expr, .. } => expr.clone(),
            other => other.to_string(),
        }
    }
}

trait NumSecondsFromMidnight {
    fn num_seconds_from_midnight(&self) -> u32;
}

impl NumSecondsFromMidnight for DateTime<Utc> {
    fn num_seconds_from_midnight(&self) -> u32 {
        use chrono::Timelike;
        self.hour() * 3600 + self.minute() * 60 + self.second()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => {
                // Display integers without decimal point
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Formula { result, expr, .. } => {
                if let Some(result) = result {
                    write!(f, "{result}")
                } else {
                    write!(f, "={expr}")
                }
            }
            CellValue::Error(e) => write!(f, "{e}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(d: DateTime<Utc>) -> Self {
        CellValue::Date(d)
    }
}
