use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use regex::Regex;
use tempfile::NamedTempFile;

use super::alerts::model::AlertEvent;
use super::error::{AttendanceError, Result};

/// Timestamp embedded in archive file names.
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
/// Timestamp used inside the report log.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
pub const ARCHIVE_SUFFIX: &str = ".log.archive";

lazy_static! {
    // Pattern: reports_20260101_120000.log.archive
    static ref ARCHIVE_NAME: Regex =
        Regex::new(r"^(.+)_(\d{8}_\d{6})\.log\.archive$").expect("Invalid archive regex");
}

/// Report file name without its `.log` extension ("reports" for "reports.log").
pub fn report_stem(report_file: &Path) -> String {
    let name = report_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let Some(stem) = name.strip_suffix(".log") {
        return stem.to_string();
    }
    report_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(name)
}

/// Where `report_file` goes when displaced at time `at`.
pub fn archive_path_for(reports_dir: &Path, report_file: &Path, at: &DateTime<Local>) -> PathBuf {
    reports_dir.join(format!(
        "{}_{}{}",
        report_stem(report_file),
        at.format(ARCHIVE_TIMESTAMP_FORMAT),
        ARCHIVE_SUFFIX
    ))
}

/// Rename an existing report to a timestamped archive.
///
/// Returns the archive path, or None when there was nothing to archive.
/// A second archive within the same second replaces the first.
pub fn archive_existing_report(reports_dir: &Path, report_file: &Path) -> Result<Option<PathBuf>> {
    archive_existing_report_at(reports_dir, report_file, &Local::now())
}

pub fn archive_existing_report_at(
    reports_dir: &Path,
    report_file: &Path,
    at: &DateTime<Local>,
) -> Result<Option<PathBuf>> {
    if !report_file.exists() {
        return Ok(None);
    }

    fs::create_dir_all(reports_dir).map_err(|e| AttendanceError::io(reports_dir, e))?;
    let archive = archive_path_for(reports_dir, report_file, at);
    fs::rename(report_file, &archive).map_err(|e| AttendanceError::io(report_file, e))?;
    log::info!("Archived previous report to {:?}", archive);
    Ok(Some(archive))
}

/// Archives of `report_file` found in `reports_dir`, oldest first.
pub fn list_archives(reports_dir: &Path, report_file: &Path) -> Result<Vec<PathBuf>> {
    if !reports_dir.exists() {
        return Ok(Vec::new());
    }

    let mut archives: Vec<(String, PathBuf)> = Vec::new();

    let stem = report_stem(report_file);
    let entries = fs::read_dir(reports_dir).map_err(|e| AttendanceError::io(reports_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| AttendanceError::io(reports_dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let filename = entry.file_name();
        let filename = filename.to_string_lossy();
        let Some(caps) = ARCHIVE_NAME.captures(&filename) else {
            continue;
        };
        if caps.get(1).map(|m| m.as_str()) != Some(stem.as_str()) {
            continue;
        }
        let timestamp = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
        archives.push((timestamp, path));
    }

    archives.sort();
    Ok(archives.into_iter().map(|(_, path)| path).collect())
}

pub fn header_line(at: &DateTime<Local>) -> String {
    format!(
        "--- Attendance Report Run: {} ---",
        at.format(LOG_TIMESTAMP_FORMAT)
    )
}

pub fn alert_line(at: &DateTime<Local>, alert: &AlertEvent) -> String {
    format!(
        "[{}] ALERT SENT TO {}: {}",
        at.format(LOG_TIMESTAMP_FORMAT),
        alert.email,
        alert.message
    )
}

/// Append-only report log, held open for the whole run.
///
/// Lines go to a temporary sibling of the report file, which only takes the
/// report's name in `finish`. A run that stops early leaves no report behind.
pub struct ReportLog {
    writer: BufWriter<NamedTempFile>,
    path: PathBuf,
}

impl ReportLog {
    /// Open the pending report and write the run header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let prefix = format!("{}.", report_stem(&path));
        let pending = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".partial")
            .tempfile_in(&dir)
            .map_err(|e| AttendanceError::io(&dir, e))?;
        let mut log = Self {
            writer: BufWriter::new(pending),
            path,
        };
        log.write_line(&header_line(&Local::now()))?;
        Ok(log)
    }

    pub fn append_alert(&mut self, alert: &AlertEvent) -> Result<()> {
        self.write_line(&alert_line(&Local::now(), alert))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| AttendanceError::io(&self.path, e))
    }

    /// Flush and move the pending file to the report path.
    /// Dropping without calling this discards the pending file.
    pub fn finish(self) -> Result<()> {
        let pending = self
            .writer
            .into_inner()
            .map_err(|e| AttendanceError::io(&self.path, e.into_error()))?;
        pending
            .persist(&self.path)
            .map_err(|e| AttendanceError::io(&self.path, e.error))?;
        Ok(())
    }
}
