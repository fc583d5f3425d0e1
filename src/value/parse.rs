use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_traits::{NumCast, ToPrimitive};

use super::{Value, ValueType};
use crate::error::{Error, Result};

/// 日時文字列の既定フォーマット (RFC 3339 は常に最初に試す)
pub const DEFAULT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d",
];

impl Value {
    /// Builds a value of the given type from its textual form.
    ///
    /// Text is taken verbatim: no trimming, so `" 1"` is not an int.
    pub fn from_text(value_type: ValueType, text: &str) -> Result<Value> {
        Self::from_text_with_formats(value_type, text, DEFAULT_DATETIME_FORMATS)
    }

    /// Like [`Value::from_text`], with explicit chrono formats for date-times
    pub fn from_text_with_formats<S: AsRef<str>>(
        value_type: ValueType,
        text: &str,
        datetime_formats: &[S],
    ) -> Result<Value> {
        let parse_error = |reason: String| Error::Parse {
            value_type,
            text: text.to_string(),
            reason,
        };

        match value_type {
            ValueType::Int => text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| parse_error(e.to_string())),
            ValueType::Float => text
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| parse_error(e.to_string())),
            ValueType::String => Ok(Value::Str(text.to_string())),
            ValueType::DateTime => parse_datetime(text, datetime_formats)
                .map(Value::DateTime)
                .ok_or_else(|| parse_error("no matching date-time format".to_string())),
        }
    }

    /// Builds a numeric value of the given type from a primitive number.
    ///
    /// Fractions are truncated toward zero for `Int`. Text and date-time
    /// have no numeric constructor and fail with `UnsupportedOperation`.
    pub fn from_number<N: ToPrimitive + Copy>(value_type: ValueType, number: N) -> Result<Value> {
        match value_type {
            ValueType::Int => <i64 as NumCast>::from(number)
                .map(Value::Int)
                .ok_or_else(|| {
                    Error::InvalidInput("number is out of range for an int value".to_string())
                }),
            ValueType::Float => number
                .to_f64()
                .map(Value::Float)
                .ok_or_else(|| Error::InvalidInput("number has no float form".to_string())),
            other => Err(Error::unsupported("from_number", other)),
        }
    }
}

fn parse_datetime<S: AsRef<str>>(text: &str, formats: &[S]) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    formats.iter().find_map(|format| {
        let format = format.as_ref();
        NaiveDateTime::parse_from_str(text, format).ok().or_else(|| {
            // date-only formats carry no time fields
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
    })
}
