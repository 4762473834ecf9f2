use crate::catalog::schema::CatalogDef;
use crate::model::{Report, OTHER_PARAMETERS_KEY};
use crate::parsing::{normalize_value, parse_range};
use crate::reference::resolve_range;
use crate::series::{ParameterSeries, SeriesBuild, SeriesPoint, SkippedValue};
use std::collections::BTreeMap;

/// Group a user's reports into per-parameter series.
pub fn build_series(reports: &[Report], catalog: &CatalogDef) -> BTreeMap<String, ParameterSeries> {
    build_series_with_diagnostics(reports, catalog).series
}

/// Group a user's reports into per-parameter series, keeping track of
/// values that were dropped because they could not be read as numbers.
///
/// Reports are stably sorted by upload time first, so input order only
/// matters between reports sharing a timestamp. Parameter names are used
/// exactly as supplied. Unit and reference range come from the earliest
/// report that states them; when no report states a usable range, the
/// catalog entry for the exact name is used.
pub fn build_series_with_diagnostics(reports: &[Report], catalog: &CatalogDef) -> SeriesBuild {
    let mut ordered: Vec<&Report> = reports.iter().collect();
    ordered.sort_by_key(|r| r.upload_timestamp);

    let mut series: BTreeMap<String, ParameterSeries> = BTreeMap::new();
    let mut skipped = Vec::new();

    for report in ordered {
        for (name, raw) in &report.extracted_data {
            if name == OTHER_PARAMETERS_KEY || raw.is_null() {
                continue;
            }

            let observation = match normalize_value(raw) {
                Ok(obs) => obs,
                Err(e) => {
                    tracing::debug!(
                        report_id = %report.id,
                        parameter = %name,
                        error = %e,
                        "dropping unparsable value"
                    );
                    skipped.push(SkippedValue {
                        report_id: report.id.clone(),
                        parameter: name.clone(),
                        raw: serde_json::to_string(raw).unwrap_or_default(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let entry = series
                .entry(name.clone())
                .or_insert_with(|| ParameterSeries::new(name.as_str()));

            entry.points.push(SeriesPoint {
                timestamp: report.upload_timestamp,
                value: observation.value,
            });

            if entry.unit.is_none() {
                entry.unit = observation.unit;
            }

            if entry.reference_range.is_none() {
                if let Some(text) = observation.reference_range_text.as_deref() {
                    entry.reference_range = parse_range(text);
                    if entry.reference_range.is_none() {
                        tracing::debug!(
                            report_id = %report.id,
                            parameter = %name,
                            range = text,
                            "ignoring unparsable reference range"
                        );
                    }
                }
            }
        }
    }

    for (name, s) in series.iter_mut() {
        if s.reference_range.is_none() {
            s.reference_range = resolve_range(None, name, catalog);
        }
        if s.unit.is_none() {
            s.unit = catalog.lookup(name).and_then(|def| def.unit.clone());
        }
    }

    SeriesBuild { series, skipped }
}
