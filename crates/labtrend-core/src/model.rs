use crate::parsing::values::{decimal_from_json, parse_decimal};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key the extraction service uses for its free-form catch-all bucket.
pub const OTHER_PARAMETERS_KEY: &str = "other_parameters";

/// A parameter value as delivered by the extraction service.
///
/// Older reports store bare values (`14.5` or `"14.5 g/dL"`); newer ones
/// store `{ "value": .., "unit": .., "reference_range": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Structured(StructuredValue),
    Bare(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredValue {
    pub value: serde_json::Value,
    #[serde(
        default,
        deserialize_with = "lenient_text_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit: Option<String>,
    #[serde(
        default,
        alias = "referenceRange",
        deserialize_with = "lenient_text_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_range: Option<String>,
}

impl ParameterValue {
    /// True for JSON `null`, bare or nested.
    pub fn is_null(&self) -> bool {
        match self {
            ParameterValue::Bare(v) => v.is_null(),
            ParameterValue::Structured(s) => s.value.is_null(),
        }
    }
}

/// Advisory block produced by the extraction service. Never recomputed here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub health_score: Option<Decimal>,
    #[serde(default, deserialize_with = "string_list")]
    pub abnormal_parameters: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub foods_to_include: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub foods_to_avoid: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub dietary_suggestions: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub lifestyle_tips: Vec<String>,
    #[serde(default)]
    pub doctor_consultation: bool,
}

/// One ingested lab document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub user_id: String,
    #[serde(alias = "upload_date")]
    pub upload_timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    #[serde(default)]
    pub extracted_data: BTreeMap<String, ParameterValue>,
    #[serde(default, alias = "gemini_analysis", deserialize_with = "analysis_or_default")]
    pub analysis: Analysis,
}

/// Numeric `[min, max]` band, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Where a value sits relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RangeStatus {
    Below,
    Normal,
    Above,
}

impl fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeStatus::Below => write!(f, "below"),
            RangeStatus::Normal => write!(f, "normal"),
            RangeStatus::Above => write!(f, "above"),
        }
    }
}

/// A single numeric observation after value-shape normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub value: Decimal,
    pub unit: Option<String>,
    pub reference_range_text: Option<String>,
}

fn lenient_decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => decimal_from_json(&n).ok(),
        Some(serde_json::Value::String(s)) => parse_decimal(&s).ok(),
        _ => None,
    })
}

// Unit and range are metadata: a shape we cannot read must not cost the
// value its point. `{ "min": .., "max": .. }` is rendered as range text.
fn lenient_text_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Object(map)) => match (map.get("min"), map.get("max")) {
            (Some(min), Some(max)) => scalar_text(min)
                .zip(scalar_text(max))
                .map(|(min, max)| format!("{min}-{max}")),
            _ => None,
        },
        _ => None,
    })
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Extraction output sometimes carries nulls inside advisory lists.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

fn analysis_or_default<'de, D>(deserializer: D) -> Result<Analysis, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Analysis>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_accepts_store_field_names() {
        let json = r#"{
            "id": "r1",
            "user_id": "u1",
            "upload_date": "2024-03-01T09:00:00Z",
            "extracted_data": {
                "Hemoglobin": { "value": 13.2, "unit": "g/dL", "referenceRange": "12-17" },
                "TSH": "2.1 mIU/L",
                "other_parameters": { "value": "see notes" }
            },
            "gemini_analysis": {
                "summary": "Mostly fine",
                "health_score": 82,
                "abnormal_parameters": ["Vitamin D", null],
                "doctor_consultation": false
            }
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.analysis.health_score, Some(dec!(82)));
        assert_eq!(report.analysis.abnormal_parameters, vec!["Vitamin D"]);
        match &report.extracted_data["Hemoglobin"] {
            ParameterValue::Structured(s) => {
                assert_eq!(s.unit.as_deref(), Some("g/dL"));
                assert_eq!(s.reference_range.as_deref(), Some("12-17"));
            }
            other => panic!("expected structured value, got {other:?}"),
        }
        assert!(matches!(
            report.extracted_data["TSH"],
            ParameterValue::Bare(serde_json::Value::String(_))
        ));
    }

    #[test]
    fn test_missing_or_null_analysis_is_empty() {
        let json = r#"{
            "id": "r2",
            "user_id": "u1",
            "upload_timestamp": "2024-03-01T09:00:00Z",
            "analysis": null
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.analysis, Analysis::default());
        assert!(report.extracted_data.is_empty());
    }

    #[test]
    fn test_health_score_as_string() {
        let analysis: Analysis =
            serde_json::from_str(r#"{ "health_score": "74.5" }"#).unwrap();
        assert_eq!(analysis.health_score, Some(dec!(74.5)));
    }

    #[test]
    fn test_odd_metadata_keeps_structured_shape() {
        let numeric: ParameterValue =
            serde_json::from_str(r#"{ "value": 45, "unit": "mg/dL", "reference_range": 40 }"#)
                .unwrap();
        match numeric {
            ParameterValue::Structured(s) => {
                assert_eq!(s.reference_range.as_deref(), Some("40"));
                assert_eq!(s.unit.as_deref(), Some("mg/dL"));
            }
            other => panic!("expected structured value, got {other:?}"),
        }

        let object: ParameterValue = serde_json::from_str(
            r#"{ "value": 45, "unit": ["mg", "dL"], "referenceRange": { "min": 40, "max": "60" } }"#,
        )
        .unwrap();
        match object {
            ParameterValue::Structured(s) => {
                assert_eq!(s.reference_range.as_deref(), Some("40-60"));
                assert_eq!(s.unit, None);
            }
            other => panic!("expected structured value, got {other:?}"),
        }
    }

    #[test]
    fn test_null_values_detected() {
        let bare: ParameterValue = serde_json::from_str("null").unwrap();
        assert!(bare.is_null());
        let nested: ParameterValue = serde_json::from_str(r#"{ "value": null }"#).unwrap();
        assert!(nested.is_null());
    }
}
