// Threshold classification and alert text.
//
// Thresholds are compared strictly-less-than, failure first, so a
// percentage sitting exactly on a threshold lands in the better bucket.

use super::model::{AlertEvent, Classification, Severity};
use crate::core::config::Thresholds;
use crate::core::error::{AttendanceError, Result};
use crate::core::model::StudentRecord;

/// Compute the attendance percentage and its severity.
pub fn classify(
    attended: u32,
    total_sessions: u32,
    warning_threshold: f64,
    failure_threshold: f64,
) -> Result<Classification> {
    if total_sessions == 0 {
        return Err(AttendanceError::ZeroSessions);
    }

    let attendance_pct = (f64::from(attended) / f64::from(total_sessions)) * 100.0;
    let severity = if attendance_pct < failure_threshold {
        Severity::Failure
    } else if attendance_pct < warning_threshold {
        Severity::Warning
    } else {
        Severity::Ok
    };

    Ok(Classification {
        attendance_pct,
        severity,
    })
}

pub fn classify_record(
    record: &StudentRecord,
    total_sessions: u32,
    thresholds: &Thresholds,
) -> Result<Classification> {
    classify(
        record.attended_sessions,
        total_sessions,
        thresholds.warning,
        thresholds.failure,
    )
}

/// Alert text for a classified record. Returns None for OK records.
pub fn alert_message(name: &str, classification: &Classification) -> Option<String> {
    let label = classification.severity.label()?;
    let advice = match classification.severity {
        Severity::Failure => "You will fail this class.",
        Severity::Warning | Severity::Ok => "Please be careful.",
    };
    Some(format!(
        "{}: {}, your attendance is {:.1}%. {}",
        label, name, classification.attendance_pct, advice
    ))
}

/// Build the alert event for a record, if it needs one.
pub fn evaluate_record(record: &StudentRecord, classification: &Classification) -> Option<AlertEvent> {
    let message = alert_message(&record.name, classification)?;
    Some(AlertEvent {
        name: record.name.clone(),
        email: record.email.clone(),
        severity: classification.severity,
        message,
    })
}
