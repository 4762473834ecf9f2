use crate::model::Report;
use crate::numeric::round1;
use rust_decimal::Decimal;

const MAX_SCORE: Decimal = Decimal::ONE_HUNDRED;

/// Mean health score over the reports that carry one, rounded to one decimal.
///
/// Unscored reports are left out of both sum and count. `None` when no
/// report is scored, which is not the same as a score of zero.
pub fn aggregate_score(reports: &[Report]) -> Option<Decimal> {
    let scores: Vec<Decimal> = reports
        .iter()
        .filter_map(|r| {
            let score = valid_score(r);
            if score.is_none() {
                if let Some(raw) = r.analysis.health_score {
                    tracing::warn!(
                        report_id = %r.id,
                        score = %raw,
                        "ignoring health score outside 0-100"
                    );
                }
            }
            score
        })
        .collect();
    if scores.is_empty() {
        return None;
    }
    let sum: Decimal = scores.iter().copied().sum();
    sum.checked_div(Decimal::from(scores.len())).map(round1)
}

/// Score of the most recently uploaded report that has one.
pub fn latest_score(reports: &[Report]) -> Option<Decimal> {
    reports
        .iter()
        .filter_map(|r| valid_score(r).map(|score| (r.upload_timestamp, score)))
        .max_by_key(|(at, _)| *at)
        .map(|(_, score)| score)
}

/// Abnormal parameters as flagged by the extraction service, minus blanks.
pub fn abnormal_summary(report: &Report) -> Vec<String> {
    report
        .analysis
        .abnormal_parameters
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// The report's health score when it lies within 0-100.
pub fn valid_score(report: &Report) -> Option<Decimal> {
    report
        .analysis
        .health_score
        .filter(|score| (Decimal::ZERO..=MAX_SCORE).contains(score))
}
