use crate::error::LabtrendError;
use crate::model::{Observation, ParameterValue};
use crate::parsing::values::{decimal_from_json, parse_measurement};

/// Bring either value shape into one `Observation`.
///
/// Bare numbers and numeric strings are accepted on their own; the
/// structured shape contributes its explicit unit and reference range text.
/// A unit found after the number in a string is used only when no explicit
/// unit was given.
pub fn normalize_value(value: &ParameterValue) -> Result<Observation, LabtrendError> {
    match value {
        ParameterValue::Bare(raw) => {
            let (value, unit) = numeric_from_json(raw)?;
            Ok(Observation {
                value,
                unit,
                reference_range_text: None,
            })
        }
        ParameterValue::Structured(s) => {
            let (value, parsed_unit) = numeric_from_json(&s.value)?;
            let unit = clean(s.unit.as_deref()).or(parsed_unit);
            Ok(Observation {
                value,
                unit,
                reference_range_text: clean(s.reference_range.as_deref()),
            })
        }
    }
}

fn numeric_from_json(
    raw: &serde_json::Value,
) -> Result<(rust_decimal::Decimal, Option<String>), LabtrendError> {
    match raw {
        serde_json::Value::Number(n) => Ok((decimal_from_json(n)?, None)),
        serde_json::Value::String(s) => {
            let m = parse_measurement(s)?;
            Ok((m.value, m.unit))
        }
        other => Err(LabtrendError::ParseError(format!(
            "expected a number or numeric text, found {}",
            json_kind(other)
        ))),
    }
}

fn clean(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "text",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
