//! End-to-end tests over the public API using report snapshots shaped like
//! the extraction service output (mixed legacy and structured values).

use chrono::{TimeZone, Utc};
use labtrend_core::bmi::store::{BmiStore, JsonFileBmiStore, MemoryBmiStore};
use labtrend_core::bmi::BmiCategory;
use labtrend_core::catalog::builtin::default_catalog;
use labtrend_core::error::LabtrendError;
use labtrend_core::model::RangeStatus;
use labtrend_core::series::TrendDirection;
use labtrend_core::{
    aggregate_score, calculate_bmi, latest_bmi, overview, parameter_series, parse_reports_str,
    record_bmi, trend,
};
use rust_decimal_macros::dec;

const REPORTS_JSON: &str = r#"[
  {
    "id": "r3",
    "user_id": "u1",
    "upload_date": "2024-09-14T08:30:00Z",
    "report_type": "Annual Checkup",
    "extracted_data": {
      "Fasting Blood Sugar": { "value": 108, "unit": "mg/dL", "reference_range": "70 - 100" },
      "Hemoglobin": { "value": "13.9", "unit": "g/dL" },
      "Vitamin D": { "value": 31, "unit": "ng/mL" },
      "other_parameters": { "value": "Urine routine normal" }
    },
    "analysis": {
      "summary": "Blood sugar slightly elevated.",
      "health_score": 72,
      "abnormal_parameters": ["Fasting Blood Sugar"],
      "doctor_consultation": true
    }
  },
  {
    "id": "r1",
    "user_id": "u1",
    "upload_date": "2024-01-05T08:30:00Z",
    "extracted_data": {
      "Fasting Blood Sugar": "86 mg/dL",
      "Hemoglobin": "12.6 g/dL",
      "Vitamin D": "18 ng/mL",
      "TSH": "pending"
    },
    "gemini_analysis": {
      "summary": "Vitamin D deficiency.",
      "health_score": 64,
      "abnormal_parameters": ["Vitamin D", null, ""],
      "doctor_consultation": false
    }
  },
  {
    "id": "r2",
    "user_id": "u1",
    "upload_date": "2024-05-20T08:30:00Z",
    "extracted_data": {
      "Fasting Blood Sugar": 96,
      "Hemoglobin": null,
      "Vitamin D": 24
    }
  }
]"#;

#[test]
fn series_are_ordered_and_counted() {
    let reports = parse_reports_str(REPORTS_JSON).unwrap();
    let series = parameter_series(&reports, default_catalog().unwrap());

    let fbs = &series["Fasting Blood Sugar"];
    let values: Vec<_> = fbs.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![dec!(86), dec!(96), dec!(108)]);
    assert!(fbs.points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(fbs.unit.as_deref(), Some("mg/dL"));

    // null in r2 does not produce a point
    assert_eq!(series["Hemoglobin"].points.len(), 2);
    // unparsable TSH dropped entirely
    assert!(!series.contains_key("TSH"));
    assert!(!series.contains_key("other_parameters"));
}

#[test]
fn trend_over_latest_two_reports() {
    let reports = parse_reports_str(REPORTS_JSON).unwrap();
    let series = parameter_series(&reports, default_catalog().unwrap());

    let fbs = trend(&series["Fasting Blood Sugar"]);
    assert_eq!(fbs.direction, TrendDirection::Up);
    // 96 -> 108 = 12.5%
    assert_eq!(fbs.percent_variance, dec!(12.5));

    let vit_d = trend(&series["Vitamin D"]);
    assert_eq!(vit_d.direction, TrendDirection::Up);
    // 24 -> 31 = 29.166..%
    assert_eq!(vit_d.percent_variance, dec!(29.2));
}

#[test]
fn aggregate_skips_unscored_report() {
    let reports = parse_reports_str(REPORTS_JSON).unwrap();
    assert_eq!(aggregate_score(&reports), Some(dec!(68.0)));
}

#[test]
fn overview_flags_out_of_range_parameters() {
    let reports = parse_reports_str(REPORTS_JSON).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap();
    let ov = overview(&reports, default_catalog().unwrap(), now);

    assert_eq!(ov.report_count, 3);
    let order: Vec<_> = ov.reports.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(order, vec!["r3", "r2", "r1"]);
    assert_eq!(ov.reports[2].abnormal_parameters, vec!["Vitamin D"]);
    assert!(ov.reports[0].doctor_consultation);
    assert_eq!(ov.latest_score, Some(dec!(72)));

    assert_eq!(
        ov.parameters["Fasting Blood Sugar"].latest_status,
        Some(RangeStatus::Above)
    );
    assert_eq!(ov.parameters["Vitamin D"].latest_status, Some(RangeStatus::Normal));
    assert_eq!(ov.skipped.len(), 1);
    assert_eq!(ov.skipped[0].parameter, "TSH");

    let next = ov.reminder.next_checkup_date.unwrap();
    assert_eq!(next, Utc.with_ymd_and_hms(2024, 12, 13, 8, 30, 0).unwrap());
}

#[test]
fn empty_snapshot_degrades_to_absence() {
    let reports = parse_reports_str("[]").unwrap();
    assert!(parameter_series(&reports, default_catalog().unwrap()).is_empty());
    assert_eq!(aggregate_score(&reports), None);
}

#[test]
fn malformed_report_json_is_an_error() {
    let err = parse_reports_str(r#"[{ "id": "x" }]"#).unwrap_err();
    assert!(matches!(err, LabtrendError::Json(_)));
}

#[test]
fn bmi_categories_for_known_inputs() {
    let normal = calculate_bmi(dec!(175), dec!(70)).unwrap();
    assert_eq!(normal.bmi, dec!(22.9));
    assert_eq!(normal.category, BmiCategory::NormalWeight);

    let obese = calculate_bmi(dec!(175), dec!(95)).unwrap();
    assert_eq!(obese.bmi, dec!(31.0));
    assert_eq!(obese.category, BmiCategory::Obese);

    assert!(matches!(
        calculate_bmi(dec!(-175), dec!(70)),
        Err(LabtrendError::Validation(_))
    ));
}

#[test]
fn latest_bmi_from_memory_store() {
    let mut store = MemoryBmiStore::new();
    assert!(latest_bmi(&store, "u1").unwrap().is_none());

    let march = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let june = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    record_bmi(&mut store, "u1", dec!(175), dec!(80), june).unwrap();
    record_bmi(&mut store, "u1", dec!(175), dec!(84), march).unwrap();

    let latest = latest_bmi(&store, "u1").unwrap().unwrap();
    assert_eq!(latest.created_at, june);
    assert_eq!(latest.category, BmiCategory::Overweight);
}

#[test]
fn failed_bmi_is_not_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileBmiStore::new(dir.path().join("bmi.json"));
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    assert!(record_bmi(&mut store, "u1", dec!(0), dec!(70), now).is_err());
    assert!(store.records_for("u1").unwrap().is_empty());
    assert!(!store.path().exists());
}
