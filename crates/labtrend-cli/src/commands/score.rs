use labtrend_core::error::LabtrendError;
use labtrend_core::overview::report_archive;
use labtrend_core::score::valid_score;
use serde_json::json;
use std::path::PathBuf;

use crate::output;

pub fn run(reports_file: PathBuf, output_format: &str) -> Result<(), LabtrendError> {
    let reports = labtrend_core::load_reports(&reports_file)?;
    let aggregate = labtrend_core::aggregate_score(&reports);
    let scored = reports.iter().filter(|r| valid_score(r).is_some()).count();

    match output_format {
        "json" => output::json::print(&json!({
            "aggregate_score": aggregate,
            "scored_reports": scored,
            "total_reports": reports.len(),
        }))?,
        _ => {
            match aggregate {
                Some(score) => println!("Aggregate health score: {score} / 100"),
                None => println!("Aggregate health score: no scored reports"),
            }
            println!("  {} of {} report(s) carry a score\n", scored, reports.len());
            output::table::print_archive(&report_archive(&reports));
        }
    }

    Ok(())
}
