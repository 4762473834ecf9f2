use crate::error::LabtrendError;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").expect("valid number pattern"));

/// A number read out of free text, plus whatever followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub value: Decimal,
    pub unit: Option<String>,
}

/// Parse a lab value string into a number and an optional trailing unit.
///
/// Handles formats like:
/// - "68" -> 68
/// - "14.5 g/dL" -> 14.5, unit "g/dL"
/// - "5,6 %" -> 5.6, unit "%" (decimal comma)
/// - "< 0.5" -> 0.5 (the comparator is not kept)
///
/// Text without any digits is an error; callers drop such points.
pub fn parse_measurement(s: &str) -> Result<Measurement, LabtrendError> {
    let s = s.trim();
    let token = NUMBER_TOKEN
        .find(s)
        .ok_or_else(|| LabtrendError::ParseError(format!("no number in '{}'", s)))?;

    let value = parse_decimal(token.as_str())?;
    let unit = Some(s[token.end()..].trim())
        .filter(|rest| !rest.is_empty())
        .map(str::to_string);

    Ok(Measurement { value, unit })
}

/// Every unsigned numeric token in `s`, in order of appearance.
pub fn numeric_tokens(s: &str) -> Vec<Decimal> {
    NUMBER_TOKEN
        .find_iter(s)
        .filter_map(|m| parse_decimal(m.as_str()).ok())
        .collect()
}

/// Parse a decimal value, accepting a decimal comma.
pub fn parse_decimal(s: &str) -> Result<Decimal, LabtrendError> {
    let s = s.trim();
    let normalized = s.replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|e| LabtrendError::ParseError(format!("invalid number '{}': {}", s, e)))
}

/// Convert a JSON number to an exact decimal.
pub fn decimal_from_json(n: &serde_json::Number) -> Result<Decimal, LabtrendError> {
    parse_decimal(&n.to_string())
}
