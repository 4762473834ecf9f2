use crate::model::RangeStatus;
use crate::numeric::round1;
use crate::reference::classify;
use crate::series::ParameterSeries;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Neutral => write!(f, "neutral"),
        }
    }
}

/// Movement between the two most recent points of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub percent_variance: Decimal,
}

/// Direction and magnitude of the latest change.
pub fn trend(series: &ParameterSeries) -> Trend {
    Trend {
        direction: direction(series),
        percent_variance: percent_variance(series),
    }
}

/// Compare the last point with the one before it.
pub fn direction(series: &ParameterSeries) -> TrendDirection {
    match last_two(series) {
        Some((previous, last)) if last > previous => TrendDirection::Up,
        Some((previous, last)) if last < previous => TrendDirection::Down,
        _ => TrendDirection::Neutral,
    }
}

/// `|last - previous| / previous * 100`, rounded to one decimal.
///
/// Zero when there are fewer than two points or the previous value is zero.
pub fn percent_variance(series: &ParameterSeries) -> Decimal {
    let zero = round1(Decimal::ZERO);
    let Some((previous, last)) = last_two(series) else {
        return zero;
    };
    if previous.is_zero() {
        return zero;
    }

    (last - previous)
        .abs()
        .checked_div(previous.abs())
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round1)
        .unwrap_or(zero)
}

/// Classification of the most recent point, when the series has a range.
pub fn latest_status(series: &ParameterSeries) -> Option<RangeStatus> {
    let range = series.reference_range.as_ref()?;
    let latest = series.latest()?;
    Some(classify(latest.value, range))
}

fn last_two(series: &ParameterSeries) -> Option<(Decimal, Decimal)> {
    match series.points.as_slice() {
        [.., previous, last] => Some((previous.value, last.value)),
        _ => None,
    }
}
