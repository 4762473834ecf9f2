use labtrend_core::error::LabtrendError;
use std::path::PathBuf;

use crate::output;

pub fn run(
    reports_file: PathBuf,
    catalog_file: Option<PathBuf>,
    output_format: &str,
    verbose: bool,
) -> Result<(), LabtrendError> {
    let catalog = super::resolve_catalog(catalog_file.as_deref())?;
    let reports = labtrend_core::load_reports(&reports_file)?;
    let overview = labtrend_core::overview(&reports, &catalog, chrono::Utc::now());

    match output_format {
        "json" => output::json::print(&overview)?,
        _ => output::table::print_overview(&overview, verbose),
    }

    Ok(())
}
