use labtrend_core::bmi::store::{BmiStore, JsonFileBmiStore};
use labtrend_core::bmi::{calculate_bmi_str, BmiRecord};
use labtrend_core::error::LabtrendError;
use std::path::PathBuf;

use crate::output;

pub fn calc(
    height: &str,
    weight: &str,
    store_file: Option<PathBuf>,
    user: Option<String>,
    output_format: &str,
) -> Result<(), LabtrendError> {
    let result = calculate_bmi_str(height, weight)?;

    if let (Some(path), Some(user)) = (store_file, user) {
        let mut store = JsonFileBmiStore::new(path);
        store.append(BmiRecord::new(user, &result, chrono::Utc::now()))?;
    }

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print_bmi(&result),
    }

    Ok(())
}

pub fn latest(store_file: PathBuf, user: &str, output_format: &str) -> Result<(), LabtrendError> {
    let store = JsonFileBmiStore::new(store_file);
    let latest = labtrend_core::latest_bmi(&store, user)?;

    match output_format {
        "json" => output::json::print(&latest)?,
        _ => match latest {
            Some(record) => output::table::print_bmi_record(&record),
            None => println!("No BMI records for user '{user}'."),
        },
    }

    Ok(())
}
