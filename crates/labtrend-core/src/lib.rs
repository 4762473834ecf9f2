//! Longitudinal analysis of lab-report health metrics.
//!
//! Every entry point takes the caller's snapshot of reports (or a series
//! built from one) and returns a fresh result; nothing is cached between
//! calls.

pub mod bmi;
pub mod catalog;
pub mod error;
pub mod model;
pub mod numeric;
pub mod overview;
pub mod parsing;
pub mod reference;
pub mod reminder;
pub mod score;
pub mod series;

use bmi::store::BmiStore;
use bmi::{BmiRecord, BmiResult};
use catalog::schema::CatalogDef;
use error::LabtrendError;
use model::Report;
use overview::HealthOverview;
use rust_decimal::Decimal;
use series::{ParameterSeries, Trend};
use std::collections::BTreeMap;
use std::path::Path;

/// Per-parameter time series for a user's reports, keyed by exact name.
pub fn parameter_series(
    reports: &[Report],
    catalog: &CatalogDef,
) -> BTreeMap<String, ParameterSeries> {
    series::build_series(reports, catalog)
}

/// Direction and percentage change over the last two points.
pub fn trend(series: &ParameterSeries) -> Trend {
    series::trend(series)
}

/// Mean of the externally supplied health scores, `None` if none exist.
pub fn aggregate_score(reports: &[Report]) -> Option<Decimal> {
    score::aggregate_score(reports)
}

/// BMI, category, healthy weight band and tip for explicit inputs.
pub fn calculate_bmi(height_cm: Decimal, weight_kg: Decimal) -> Result<BmiResult, LabtrendError> {
    bmi::calculate_bmi(height_cm, weight_kg)
}

/// Calculate BMI and append the resulting record to `store`.
pub fn record_bmi(
    store: &mut dyn BmiStore,
    user_id: &str,
    height_cm: Decimal,
    weight_kg: Decimal,
    created_at: chrono::DateTime<chrono::Utc>,
) -> Result<BmiRecord, LabtrendError> {
    let result = bmi::calculate_bmi(height_cm, weight_kg)?;
    let record = BmiRecord::new(user_id, &result, created_at);
    store.append(record.clone())?;
    Ok(record)
}

/// The user's most recent BMI record, if any was ever stored.
pub fn latest_bmi(store: &dyn BmiStore, user_id: &str) -> Result<Option<BmiRecord>, LabtrendError> {
    store.latest(user_id)
}

/// Dashboard overview: archive, scores, per-parameter trends, reminder.
pub fn overview(
    reports: &[Report],
    catalog: &CatalogDef,
    now: chrono::DateTime<chrono::Utc>,
) -> HealthOverview {
    overview::overview(reports, catalog, now)
}

/// Load a JSON array of reports from a file.
pub fn load_reports(path: &Path) -> Result<Vec<Report>, LabtrendError> {
    let content = std::fs::read_to_string(path)?;
    parse_reports_str(&content)
}

/// Parse a JSON array of reports.
pub fn parse_reports_str(json: &str) -> Result<Vec<Report>, LabtrendError> {
    let reports: Vec<Report> = serde_json::from_str(json)?;
    tracing::debug!(count = reports.len(), "loaded reports");
    Ok(reports)
}
