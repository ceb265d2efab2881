use std::fs;
use std::io::Write;

use super::alerts::engine::{AlertReporter, AlertSink, RunSummary};
use super::config::{ConfigManager, Paths, RunMode};
use super::error::{AttendanceError, Result};
use super::log_io::{self, ReportLog};
use super::parser::RecordReader;

/// Runs the whole check: config, archival, then one pass over the records.
pub struct Coordinator {
    paths: Paths,
}

impl Coordinator {
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// Any error aborts the run; nothing is skipped or retried.
    pub fn run<W: Write>(&self, console: W) -> Result<RunSummary> {
        let paths = &self.paths;

        // 1. Config
        let config = ConfigManager::new(&paths.config_path).load()?;
        log::info!(
            "Running in {:?} mode: {} sessions, warning < {}%, failure < {}%",
            config.run_mode,
            config.total_sessions,
            config.thresholds.warning,
            config.thresholds.failure
        );

        // 2. Archive the previous report, whatever the new run's mode
        let prior = log_io::list_archives(&paths.reports_dir, &paths.report_file)?;
        log::debug!("{} archived reports in {:?}", prior.len(), paths.reports_dir);
        log_io::archive_existing_report(&paths.reports_dir, &paths.report_file)?;

        // 3. Records and the sink
        let records = RecordReader::open(&paths.records_path)?;
        let sink = match config.run_mode {
            RunMode::Live => {
                fs::create_dir_all(&paths.reports_dir)
                    .map_err(|e| AttendanceError::io(&paths.reports_dir, e))?;
                AlertSink::Live(ReportLog::create(&paths.report_file)?)
            }
            RunMode::DryRun => AlertSink::DryRun,
        };

        // 4. Classify and report
        let mut reporter = AlertReporter::new(config, sink, console);
        for record in records {
            reporter.report(&record?)?;
        }

        let summary = reporter.finish()?;
        log::info!("{}", summary);
        Ok(summary)
    }
}
