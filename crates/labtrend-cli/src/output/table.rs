use labtrend_core::bmi::{BmiRecord, BmiResult};
use labtrend_core::model::RangeStatus;
use labtrend_core::overview::{HealthOverview, ParameterTrend, ReportSummary};
use labtrend_core::series::{ParameterSeries, TrendDirection};
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn print_series(series: &BTreeMap<String, ParameterSeries>) {
    if series.is_empty() {
        println!("No numeric parameter values found.");
        return;
    }

    for (i, s) in series.values().enumerate() {
        if i > 0 {
            println!();
        }
        let range = s
            .reference_range
            .map(|r| format!("  [normal {}]", r))
            .unwrap_or_default();
        println!("=== {} ({}){} ===", s.parameter_name, unit(&s.unit), range);
        for point in &s.points {
            println!(
                "  {}  {}",
                point.timestamp.format(DATE_FORMAT),
                point.value
            );
        }
    }
}

pub fn print_trend(trend: &ParameterTrend) {
    let s = &trend.series;
    println!("=== {} ===\n", s.parameter_name);

    match s.latest() {
        Some(latest) => println!(
            "  Latest:    {} {} ({})",
            latest.value,
            unit(&s.unit),
            latest.timestamp.format(DATE_FORMAT)
        ),
        None => println!("  Latest:    -"),
    }
    if let Some(previous) = s.points.len().checked_sub(2).map(|i| &s.points[i]) {
        println!(
            "  Previous:  {} {} ({})",
            previous.value,
            unit(&s.unit),
            previous.timestamp.format(DATE_FORMAT)
        );
    }
    println!(
        "  Trend:     {} {} ({}%)",
        arrow(trend.trend.direction),
        trend.trend.direction,
        trend.trend.percent_variance
    );
    match (&s.reference_range, trend.latest_status) {
        (Some(range), Some(status)) => println!("  Range:     {} -> {}", range, status),
        _ => println!("  Range:     unavailable"),
    }
    println!("  Points:    {}", s.points.len());
}

pub fn print_archive(reports: &[ReportSummary]) {
    if reports.is_empty() {
        println!("No reports.");
        return;
    }

    let max_type = reports
        .iter()
        .map(|r| r.report_type.as_deref().unwrap_or("Health Report").len())
        .max()
        .unwrap_or(13);

    for r in reports {
        let score = r
            .health_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into());
        let doctor = if r.doctor_consultation {
            "  (see a doctor)"
        } else {
            ""
        };
        println!(
            "  {}  {:<width$}  score {:>5}{}",
            r.uploaded_at.format(DATE_FORMAT),
            r.report_type.as_deref().unwrap_or("Health Report"),
            score,
            doctor,
            width = max_type
        );
        if !r.abnormal_parameters.is_empty() {
            println!("      abnormal: {}", r.abnormal_parameters.join(", "));
        }
    }
}

pub fn print_overview(overview: &HealthOverview, verbose: bool) {
    println!("=== Overview ({} report(s)) ===\n", overview.report_count);

    match overview.aggregate_score {
        Some(score) => println!("  Aggregate score:  {score} / 100"),
        None => println!("  Aggregate score:  -"),
    }
    if let Some(score) = overview.latest_score {
        println!("  Latest score:     {score} / 100");
    }
    match (
        overview.reminder.next_checkup_date,
        overview.reminder.days_remaining,
    ) {
        (Some(date), Some(days)) if days > 0 => println!(
            "  Next checkup:     {} ({} days remaining)",
            date.format(DATE_FORMAT),
            days
        ),
        (Some(date), _) => println!("  Next checkup:     {} (due now)", date.format(DATE_FORMAT)),
        _ => {}
    }
    println!();

    if !overview.parameters.is_empty() {
        let max_name = overview
            .parameters
            .keys()
            .map(|k| k.len())
            .max()
            .unwrap_or(10);

        println!("  Parameters:");
        for p in overview.parameters.values() {
            let latest = p
                .series
                .latest()
                .map(|pt| pt.value.to_string())
                .unwrap_or_else(|| "-".into());
            println!(
                "    {:<width$}  {:>8} {:<8}  {} {:>5}%  {}",
                p.series.parameter_name,
                latest,
                unit(&p.series.unit),
                arrow(p.trend.direction),
                p.trend.percent_variance,
                status_label(p.latest_status),
                width = max_name
            );
        }
        println!();
    }

    println!("  Reports:");
    print_archive(&overview.reports);

    if verbose && !overview.skipped.is_empty() {
        println!("\n  Values left out (not numeric):");
        for s in &overview.skipped {
            println!("    {} / {}: {} ({})", s.report_id, s.parameter, s.raw, s.reason);
        }
    }
}

pub fn print_bmi(result: &BmiResult) {
    println!("  BMI:                {}", result.bmi);
    println!("  Category:           {}", result.category);
    println!("  Healthy weight:     {}", result.recommended_range);
    println!("  Tip:                {}", result.health_tip);
}

pub fn print_bmi_record(record: &BmiRecord) {
    println!(
        "  Recorded:           {}",
        record.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  Height / weight:    {} cm / {} kg",
        record.height_cm, record.weight_kg
    );
    println!("  BMI:                {}", record.bmi);
    println!("  Category:           {}", record.category);
    println!("  Healthy weight:     {}", record.recommended_range);
}

fn unit(unit: &Option<String>) -> &str {
    unit.as_deref().unwrap_or("")
}

fn arrow(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "^",
        TrendDirection::Down => "v",
        TrendDirection::Neutral => "=",
    }
}

fn status_label(status: Option<RangeStatus>) -> &'static str {
    match status {
        Some(RangeStatus::Below) => "LOW",
        Some(RangeStatus::Normal) => "ok",
        Some(RangeStatus::Above) => "HIGH",
        None => "",
    }
}
