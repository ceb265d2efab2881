// Alert model types for classification results and emitted alerts.

use std::fmt;

/// Classification bucket for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Ok,
    Warning,
    Failure,
}

impl Severity {
    /// Prefix used in the alert text, `None` for records that raise no alert.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Ok => None,
            Self::Warning => Some("WARNING"),
            Self::Failure => Some("URGENT"),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Failure => "failure",
        };
        f.write_str(name)
    }
}

/// Derived per record, never stored. `attendance_pct` is unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub attendance_pct: f64,
    pub severity: Severity,
}

/// Alert raised for a non-OK record
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub name: String,
    pub email: String,
    pub severity: Severity,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_flagged_severities_have_labels() {
        assert_eq!(Severity::Ok.label(), None);
        assert_eq!(Severity::Warning.label(), Some("WARNING"));
        assert_eq!(Severity::Failure.label(), Some("URGENT"));
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = [Severity::Ok, Severity::Warning, Severity::Failure]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, ["ok", "warning", "failure"]);
    }
}
