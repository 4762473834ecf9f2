pub mod builder;
pub mod trend;

use crate::model::ReferenceRange;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use builder::{build_series, build_series_with_diagnostics};
pub use trend::{direction, latest_status, percent_variance, trend, Trend, TrendDirection};

/// One observation of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    pub value: Decimal,
}

/// Time-ordered values of one parameter across a user's reports.
///
/// Derived on every query; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSeries {
    pub parameter_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub points: Vec<SeriesPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<ReferenceRange>,
}

impl ParameterSeries {
    pub fn new(parameter_name: impl Into<String>) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            unit: None,
            points: Vec::new(),
            reference_range: None,
        }
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }
}

/// A parameter value that could not be read as a number and was left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedValue {
    pub report_id: String,
    pub parameter: String,
    /// The value as it appeared in the report, re-encoded as JSON.
    pub raw: String,
    pub reason: String,
}

/// Series keyed by exact parameter name, plus what was dropped on the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesBuild {
    pub series: BTreeMap<String, ParameterSeries>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedValue>,
}
