// Alert reporter - classifies records and dispatches alerts per run mode.

use std::fmt;
use std::io::Write;

use super::model::{AlertEvent, Severity};
use super::triggers::{classify_record, evaluate_record};
use crate::core::config::RunConfig;
use crate::core::error::{AttendanceError, Result};
use crate::core::log_io::ReportLog;
use crate::core::model::StudentRecord;

const CONSOLE: &str = "<console>";

/// Where alerts end up. Only `Live` touches the filesystem.
pub enum AlertSink {
    Live(ReportLog),
    DryRun,
}

/// Per-severity tally for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub ok: usize,
    pub warning: usize,
    pub failure: usize,
}

impl RunSummary {
    fn record(&mut self, severity: Severity) {
        self.total += 1;
        match severity {
            Severity::Ok => self.ok += 1,
            Severity::Warning => self.warning += 1,
            Severity::Failure => self.failure += 1,
        }
    }

    pub fn alerts(self) -> usize {
        self.warning + self.failure
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} records: {} ok, {} warning, {} urgent",
            self.total, self.ok, self.warning, self.failure
        )
    }
}

/// Alert reporter state for one run
pub struct AlertReporter<W: Write> {
    config: RunConfig,
    sink: AlertSink,
    /// Operator console (stdout in the binary)
    console: W,
    summary: RunSummary,
}

impl<W: Write> AlertReporter<W> {
    pub fn new(config: RunConfig, sink: AlertSink, console: W) -> Self {
        Self {
            config,
            sink,
            console,
            summary: RunSummary::default(),
        }
    }

    /// Classify one record and emit its alert, if any.
    pub fn report(&mut self, record: &StudentRecord) -> Result<Option<AlertEvent>> {
        let classification =
            classify_record(record, self.config.total_sessions, &self.config.thresholds)?;
        self.summary.record(classification.severity);

        let Some(alert) = evaluate_record(record, &classification) else {
            log::debug!(
                "{} at {:.1}% needs no alert",
                record.name,
                classification.attendance_pct
            );
            return Ok(None);
        };

        let echoed = match &mut self.sink {
            AlertSink::Live(report_log) => {
                report_log.append_alert(&alert)?;
                writeln!(self.console, "Logged alert for {}", alert.name)
            }
            AlertSink::DryRun => writeln!(
                self.console,
                "[DRY RUN] Email to {}: {}",
                alert.email, alert.message
            ),
        };
        echoed.map_err(|e| AttendanceError::io(CONSOLE, e))?;

        Ok(Some(alert))
    }

    /// Flush the report log (live mode) and hand back the tally.
    pub fn finish(mut self) -> Result<RunSummary> {
        self.console
            .flush()
            .map_err(|e| AttendanceError::io(CONSOLE, e))?;
        if let AlertSink::Live(report_log) = self.sink {
            report_log.finish()?;
        }
        Ok(self.summary)
    }
}
