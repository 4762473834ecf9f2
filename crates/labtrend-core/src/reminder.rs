use crate::model::Report;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Days between a report upload and the next suggested checkup.
pub const CHECKUP_INTERVAL_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderStatus {
    pub next_checkup_date: Option<DateTime<Utc>>,
    /// Whole days until the checkup; negative once overdue.
    pub days_remaining: Option<i64>,
}

/// Next checkup date, counted from the most recent upload.
pub fn next_checkup(reports: &[Report]) -> Option<DateTime<Utc>> {
    let last_upload = reports.iter().map(|r| r.upload_timestamp).max()?;
    last_upload.checked_add_signed(Duration::days(CHECKUP_INTERVAL_DAYS))
}

pub fn reminder_status(reports: &[Report], now: DateTime<Utc>) -> ReminderStatus {
    let next = next_checkup(reports);
    ReminderStatus {
        next_checkup_date: next,
        days_remaining: next.map(|date| (date - now).num_days()),
    }
}
