//! Value shapes and typed interpretation of captured values.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::extract::rules::patterns::{
    CODE_VALUE, CURRENCY_VALUE, DATE_MDY, DATE_MONTH_NAME, DATE_VALUE, DATE_YMD, NUMBER_VALUE,
};

/// Shape of a captured value, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    /// `$25,000` or `$1,234.56`
    Currency,
    /// `01/15/2024`, `1-15-24`
    Date,
    /// `1,250`
    Number,
    /// `ABC-123`
    Code,
    /// Anything else.
    Text,
}

impl ValueShape {
    /// Classify a trimmed value. The first matching shape wins.
    pub fn classify(value: &str) -> Self {
        if CURRENCY_VALUE.is_match(value) {
            ValueShape::Currency
        } else if DATE_VALUE.is_match(value) {
            ValueShape::Date
        } else if NUMBER_VALUE.is_match(value) {
            ValueShape::Number
        } else if CODE_VALUE.is_match(value) {
            ValueShape::Code
        } else {
            ValueShape::Text
        }
    }
}

/// A value converted for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    Currency(Decimal),
    Date(NaiveDate),
    Number(Decimal),
    Code(String),
    Text(String),
}

impl TypedValue {
    /// Interpret a captured value.
    ///
    /// Values whose shape matches but do not parse (`13/45/2024`) fall back
    /// to [`TypedValue::Text`]. ISO and month-name dates are recognized even
    /// though they classify as code or text.
    pub fn interpret(value: &str) -> Self {
        let value = value.trim();
        let parsed = match ValueShape::classify(value) {
            ValueShape::Currency => parse_amount(value.trim_start_matches('$')).map(TypedValue::Currency),
            ValueShape::Date => parse_date(value).map(TypedValue::Date),
            ValueShape::Number => parse_amount(value).map(TypedValue::Number),
            // YYYY-MM-DD also has the code shape
            ValueShape::Code => parse_date(value)
                .map(TypedValue::Date)
                .or_else(|| Some(TypedValue::Code(value.to_string()))),
            ValueShape::Text => parse_date(value).map(TypedValue::Date),
        };

        parsed.unwrap_or_else(|| TypedValue::Text(value.to_string()))
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            TypedValue::Currency(_) => ValueShape::Currency,
            TypedValue::Date(_) => ValueShape::Date,
            TypedValue::Number(_) => ValueShape::Number,
            TypedValue::Code(_) => ValueShape::Code,
            TypedValue::Text(_) => ValueShape::Text,
        }
    }
}

/// Parse a US-formatted amount with thousands separators (`1,234.56`).
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Parse `MM/DD/YYYY`, `YYYY-MM-DD` or `Month DD, YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Some(caps) = DATE_MDY.captures(s) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_YMD.captures(s) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_MONTH_NAME.captures(s) {
        let month = month_to_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    match s.len() {
        // Two-digit year: 00-50 are 2000s, 51-99 are 1900s
        2 if year <= 50 => Some(2000 + year),
        2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

fn month_to_number(month: &str) -> Option<u32> {
    let number = match month.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}
