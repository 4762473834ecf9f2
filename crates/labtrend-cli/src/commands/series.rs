use labtrend_core::error::LabtrendError;
use labtrend_core::overview::ParameterTrend;
use std::path::PathBuf;

use crate::output;

pub fn run(
    reports_file: PathBuf,
    catalog_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), LabtrendError> {
    let catalog = super::resolve_catalog(catalog_file.as_deref())?;
    let reports = labtrend_core::load_reports(&reports_file)?;
    let series = labtrend_core::parameter_series(&reports, &catalog);

    match output_format {
        "json" => output::json::print(&series)?,
        _ => output::table::print_series(&series),
    }

    Ok(())
}

pub fn trend(
    reports_file: PathBuf,
    parameter: &str,
    catalog_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), LabtrendError> {
    let catalog = super::resolve_catalog(catalog_file.as_deref())?;
    let reports = labtrend_core::load_reports(&reports_file)?;
    let mut all = labtrend_core::parameter_series(&reports, &catalog);

    let Some(series) = all.remove(parameter) else {
        let known: Vec<&str> = all.keys().map(String::as_str).collect();
        return Err(LabtrendError::Validation(format!(
            "no numeric values for parameter '{}'. Known parameters: {}",
            parameter,
            if known.is_empty() {
                "none".to_string()
            } else {
                known.join(", ")
            }
        )));
    };

    let trend = ParameterTrend::from_series(series);
    match output_format {
        "json" => output::json::print(&trend)?,
        _ => output::table::print_trend(&trend),
    }

    Ok(())
}
