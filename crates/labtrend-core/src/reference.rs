use crate::catalog::schema::CatalogDef;
use crate::model::{RangeStatus, ReferenceRange};
use crate::parsing::parse_range;
use rust_decimal::Decimal;

/// Resolve the reference range for a parameter.
///
/// The report's own range text takes precedence; when it is absent or
/// unparsable the catalog entry for `parameter` (exact name) is used.
/// `None` means classification is unavailable for this parameter.
pub fn resolve_range(
    report_range: Option<&str>,
    parameter: &str,
    catalog: &CatalogDef,
) -> Option<ReferenceRange> {
    if let Some(text) = report_range {
        match parse_range(text) {
            Some(range) => return Some(range),
            None => tracing::debug!(
                parameter,
                range = text,
                "unparsable reference range, trying catalog"
            ),
        }
    }
    catalog.lookup(parameter).map(|def| def.range())
}

/// Classify a value against an inclusive range.
pub fn classify(value: Decimal, range: &ReferenceRange) -> RangeStatus {
    if value < range.min {
        RangeStatus::Below
    } else if value > range.max {
        RangeStatus::Above
    } else {
        RangeStatus::Normal
    }
}
