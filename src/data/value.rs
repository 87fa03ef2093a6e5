//! Scalar cell values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// A raw value in a dataset cell or column header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Missing value
    #[default]
    Empty,
    /// Free text
    Text(String),
    /// Whole number
    Integer(i64),
    /// Floating point number
    Number(f64),
    /// Boolean flag
    Boolean(bool),
    /// Date or timestamp
    Date(NaiveDateTime),
}

impl CellValue {
    /// Text value.
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Date value at midnight.
    pub fn date(date: NaiveDate) -> Self {
        CellValue::Date(date.and_time(chrono::NaiveTime::MIN))
    }

    /// Check if this is a missing value. NaN numbers count as missing.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Check if this is a date-like value.
    pub fn is_date(&self) -> bool {
        matches!(self, CellValue::Date(_))
    }

    /// Infer a typed value from raw text, as read from a delimited file.
    ///
    /// Empty (after trimming) → `Empty`; then integer, float, boolean, date;
    /// anything else is kept as untrimmed text.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
        match trimmed {
            "true" | "TRUE" | "True" => return CellValue::Boolean(true),
            "false" | "FALSE" | "False" => return CellValue::Boolean(false),
            _ => {}
        }
        parse_date(trimmed)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(raw.to_string()))
    }

    /// Interpret a column label: date-looking labels become dates, anything
    /// else stays text.
    pub fn label(raw: &str) -> Self {
        parse_date(raw.trim())
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(raw.to_string()))
    }
}

/// Parse an ISO-style date or timestamp.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Integer(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::Date(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::date(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => n.as_f64().map(CellValue::Number).unwrap_or_default(),
            },
            Value::String(s) => CellValue::Text(s),
            other => CellValue::Text(other.to_string()),
        }
    }
}
