use crate::catalog::schema::CatalogDef;
use crate::model::{RangeStatus, Report};
use crate::reminder::{reminder_status, ReminderStatus};
use crate::score::{abnormal_summary, aggregate_score, latest_score, valid_score};
use crate::series::{
    build_series_with_diagnostics, latest_status, trend, ParameterSeries, SkippedValue, Trend,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of the report archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_score: Option<Decimal>,
    pub summary: String,
    pub abnormal_parameters: Vec<String>,
    pub doctor_consultation: bool,
}

/// A series together with its latest movement and range status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterTrend {
    #[serde(flatten)]
    pub series: ParameterSeries,
    pub trend: Trend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_status: Option<RangeStatus>,
}

impl ParameterTrend {
    pub fn from_series(series: ParameterSeries) -> Self {
        Self {
            trend: trend(&series),
            latest_status: latest_status(&series),
            series,
        }
    }
}

/// Everything a dashboard needs for one user, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthOverview {
    pub report_count: usize,
    /// Newest first.
    pub reports: Vec<ReportSummary>,
    pub aggregate_score: Option<Decimal>,
    pub latest_score: Option<Decimal>,
    pub parameters: BTreeMap<String, ParameterTrend>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedValue>,
    pub reminder: ReminderStatus,
}

impl HealthOverview {
    /// Parameters whose latest value is outside their reference range.
    pub fn out_of_range(&self) -> impl Iterator<Item = &ParameterTrend> {
        self.parameters
            .values()
            .filter(|p| matches!(p.latest_status, Some(RangeStatus::Below | RangeStatus::Above)))
    }
}

/// Report archive, newest upload first. Equal timestamps keep input order.
pub fn report_archive(reports: &[Report]) -> Vec<ReportSummary> {
    let mut ordered: Vec<&Report> = reports.iter().collect();
    ordered.sort_by(|a, b| b.upload_timestamp.cmp(&a.upload_timestamp));
    ordered
        .into_iter()
        .map(|r| ReportSummary {
            id: r.id.clone(),
            uploaded_at: r.upload_timestamp,
            report_type: r.report_type.clone(),
            health_score: valid_score(r),
            summary: r.analysis.summary.clone(),
            abnormal_parameters: abnormal_summary(r),
            doctor_consultation: r.analysis.doctor_consultation,
        })
        .collect()
}

/// Build the full overview for one user's reports.
pub fn overview(reports: &[Report], catalog: &CatalogDef, now: DateTime<Utc>) -> HealthOverview {
    let build = build_series_with_diagnostics(reports, catalog);
    let parameters = build
        .series
        .into_iter()
        .map(|(name, series)| (name, ParameterTrend::from_series(series)))
        .collect();

    HealthOverview {
        report_count: reports.len(),
        reports: report_archive(reports),
        aggregate_score: aggregate_score(reports),
        latest_score: latest_score(reports),
        parameters,
        skipped: build.skipped,
        reminder: reminder_status(reports, now),
    }
}
